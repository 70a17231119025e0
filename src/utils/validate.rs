use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

// 本地开发用的引导管理员邮箱（admin@localhost）没有顶级域
static LOCAL_EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@localhost$").expect("Invalid email regex"));

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) && !LOCAL_EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 邮箱统一去空白并转小写，唯一性按此比较
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 必填文本：去除首尾空白后非空才算提供
pub fn required_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// 满分合法区间 [0, 100]
pub fn is_valid_max_marks(max_marks: f64) -> bool {
    max_marks.is_finite() && (0.0..=100.0).contains(&max_marks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("teacher@school.edu").is_ok());
        assert!(validate_email("admin@localhost").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Alice@School.EDU "), "alice@school.edu");
    }

    #[test]
    fn test_required_text() {
        assert_eq!(required_text(Some("  7A ")), Some("7A".to_string()));
        assert_eq!(required_text(Some("   ")), None);
        assert_eq!(required_text(None), None);
    }

    #[test]
    fn test_max_marks_range() {
        assert!(is_valid_max_marks(0.0));
        assert!(is_valid_max_marks(100.0));
        assert!(!is_valid_max_marks(100.5));
        assert!(!is_valid_max_marks(-1.0));
        assert!(!is_valid_max_marks(f64::NAN));
    }
}
