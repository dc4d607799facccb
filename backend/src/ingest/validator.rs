//! Field rules shared by CSV rows and manually entered records.

use super::parser::RawRow;
use common::model::record::NewRecord;

/// Validates one parsed CSV row.
///
/// Rules are applied in order: `name` present and non-blank, `age` an exact
/// base-10 integer greater than zero, `city` present and non-blank. Returns
/// the trimmed, typed record, or `None` if any rule fails.
pub fn validate(raw: &RawRow) -> Option<NewRecord> {
    let name = raw.name.as_deref()?;
    let age = parse_age(raw.age.as_deref()?)?;
    let city = raw.city.as_deref()?;
    normalize(name, age, city)
}

/// Applies the same rules to already typed input.
pub fn normalize(name: &str, age: i64, city: &str) -> Option<NewRecord> {
    let name = name.trim();
    if name.is_empty() || age <= 0 {
        return None;
    }
    let city = city.trim();
    if city.is_empty() {
        return None;
    }
    Some(NewRecord {
        name: name.to_string(),
        age,
        city: city.to_string(),
    })
}

// "30.0", "30abc" and out-of-range values all fail to parse.
fn parse_age(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: Option<&str>, age: Option<&str>, city: Option<&str>) -> RawRow {
        RawRow {
            name: name.map(str::to_string),
            age: age.map(str::to_string),
            city: city.map(str::to_string),
        }
    }

    #[test]
    fn valid_row_is_trimmed_and_typed() {
        let row = validate(&raw(Some("  Ana "), Some(" 30 "), Some("\tLima"))).unwrap();
        assert_eq!(
            row,
            NewRecord {
                name: "Ana".to_string(),
                age: 30,
                city: "Lima".to_string(),
            }
        );
    }

    #[test]
    fn blank_or_missing_name_is_invalid() {
        assert!(validate(&raw(Some(""), Some("25"), Some("Quito"))).is_none());
        assert!(validate(&raw(Some("   "), Some("25"), Some("Quito"))).is_none());
        assert!(validate(&raw(None, Some("25"), Some("Quito"))).is_none());
    }

    #[test]
    fn blank_or_missing_city_is_invalid() {
        assert!(validate(&raw(Some("Leo"), Some("25"), Some(" "))).is_none());
        assert!(validate(&raw(Some("Leo"), Some("25"), None)).is_none());
    }

    #[test]
    fn non_positive_age_is_invalid() {
        assert!(validate(&raw(Some("Leo"), Some("-5"), Some("Quito"))).is_none());
        assert!(validate(&raw(Some("Leo"), Some("0"), Some("Quito"))).is_none());
    }

    #[test]
    fn age_must_be_an_exact_integer() {
        for age in ["30.5", "30.0", "30abc", "abc", "", "1e2", "99999999999999999999"] {
            assert!(
                validate(&raw(Some("Leo"), Some(age), Some("Quito"))).is_none(),
                "age {:?} should be rejected",
                age
            );
        }
        assert!(validate(&raw(Some("Leo"), None, Some("Quito"))).is_none());
    }

    #[test]
    fn normalize_applies_the_same_rules() {
        assert_eq!(normalize(" Ana ", 30, " Lima ").unwrap().name, "Ana");
        assert!(normalize("Ana", 0, "Lima").is_none());
        assert!(normalize("", 30, "Lima").is_none());
        assert!(normalize("Ana", 30, "  ").is_none());
    }
}
