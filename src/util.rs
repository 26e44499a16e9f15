use crate::genealogy::Member;

const CLAN_SUFFIXES: [&str; 5] = ["氏", "族", "clan", "lineage", "family"];

pub fn birth_year(birth_date: &str) -> Option<&str> {
    birth_date
        .split('-')
        .next()
        .map(str::trim)
        .filter(|year| !year.is_empty())
}

pub fn status_line(member: &Member) -> String {
    if member.is_deceased() {
        return "deceased".to_owned();
    }
    format!("born {}", birth_year(&member.birth_date).unwrap_or("?"))
}

/// Short surname label for a spouse card, derived from her family's name.
pub fn spouse_tag(family_name: Option<&str>) -> String {
    let Some(name) = family_name.map(str::trim).filter(|name| !name.is_empty()) else {
        return "spouse".to_owned();
    };

    let mut stem = name;
    for suffix in CLAN_SUFFIXES {
        let Some(split) = stem.len().checked_sub(suffix.len()) else {
            continue;
        };
        if let (Some(head), Some(tail)) = (stem.get(..split), stem.get(split..))
            && tail.to_lowercase() == suffix
        {
            stem = head.trim_end();
            break;
        }
    }

    if let Some(last) = stem.chars().last()
        && is_cjk(last)
    {
        return format!("{last}氏");
    }

    stem.split_whitespace()
        .last()
        .map(str::to_owned)
        .unwrap_or_else(|| "spouse".to_owned())
}

fn is_cjk(ch: char) -> bool {
    matches!(ch, '\u{3400}'..='\u{4DBF}' | '\u{4E00}'..='\u{9FFF}' | '\u{F900}'..='\u{FAFF}')
}

pub fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() { placeholder } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_birth_year_takes_first_segment() {
        assert_eq!(birth_year("1985-03-12"), Some("1985"));
        assert_eq!(birth_year("1985"), Some("1985"));
        assert_eq!(birth_year(""), None);
        assert_eq!(birth_year("-03"), None);
    }

    #[test]
    fn test_status_line_variants() {
        let mut member = Member::new("a", "f", "A");
        assert_eq!(status_line(&member), "born ?");

        member.birth_date = "1990-01-01".into();
        assert_eq!(status_line(&member), "born 1990");

        member.death_date = Some("2020".into());
        assert_eq!(status_line(&member), "deceased");

        member.death_date = Some("  ".into());
        assert_eq!(status_line(&member), "born 1990");
    }

    #[test]
    fn test_spouse_tag_from_family_name() {
        assert_eq!(spouse_tag(Some("济阳蒋氏")), "蒋氏");
        assert_eq!(spouse_tag(Some("清河张族")), "张氏");
        assert_eq!(spouse_tag(Some("向")), "向氏");
        assert_eq!(spouse_tag(Some("The Smith Family")), "Smith");
        assert_eq!(spouse_tag(Some("Jones")), "Jones");
    }

    #[test]
    fn test_spouse_tag_fallbacks() {
        assert_eq!(spouse_tag(None), "spouse");
        assert_eq!(spouse_tag(Some("  ")), "spouse");
        assert_eq!(spouse_tag(Some("氏")), "spouse");
        assert_eq!(spouse_tag(Some("family")), "spouse");
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(or_placeholder("", "none"), "none");
        assert_eq!(or_placeholder("text", "none"), "text");
    }
}
