//! 等级换算

use crate::models::results::entities::Grade;

/// 按得分率换算等级
///
/// 满分不为正数（或不是有限值）时没有意义，返回 `N/A`。
pub fn grade(marks_obtained: f64, max_marks: f64) -> Grade {
    if !max_marks.is_finite() || max_marks <= 0.0 {
        return Grade::NotApplicable;
    }

    let percentage = marks_obtained * 100.0 / max_marks;
    if percentage >= 90.0 {
        Grade::APlus
    } else if percentage >= 80.0 {
        Grade::A
    } else if percentage >= 70.0 {
        Grade::B
    } else if percentage >= 60.0 {
        Grade::C
    } else if percentage >= 50.0 {
        Grade::D
    } else {
        Grade::F
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(grade(90.0, 100.0), Grade::APlus);
        assert_eq!(grade(89.0, 100.0), Grade::A);
        assert_eq!(grade(80.0, 100.0), Grade::A);
        assert_eq!(grade(70.0, 100.0), Grade::B);
        assert_eq!(grade(60.0, 100.0), Grade::C);
        assert_eq!(grade(59.0, 100.0), Grade::D);
        assert_eq!(grade(50.0, 100.0), Grade::D);
        assert_eq!(grade(49.0, 100.0), Grade::F);
        assert_eq!(grade(0.0, 100.0), Grade::F);
    }

    #[test]
    fn test_scaled_max_marks() {
        // 76 / 80 = 95%
        assert_eq!(grade(76.0, 80.0), Grade::APlus);
        assert_eq!(grade(40.0, 50.0), Grade::A);
    }

    #[test]
    fn test_non_positive_max_is_not_applicable() {
        assert_eq!(grade(10.0, 0.0), Grade::NotApplicable);
        assert_eq!(grade(0.0, 0.0), Grade::NotApplicable);
        assert_eq!(grade(5.0, -10.0), Grade::NotApplicable);
        assert_eq!(grade(5.0, f64::NAN), Grade::NotApplicable);
    }

    #[test]
    fn test_monotonic_over_range() {
        fn rank(g: Grade) -> u8 {
            match g {
                Grade::F => 0,
                Grade::D => 1,
                Grade::C => 2,
                Grade::B => 3,
                Grade::A => 4,
                Grade::APlus => 5,
                Grade::NotApplicable => unreachable!(),
            }
        }
        for max in [10.0, 25.0, 80.0, 100.0] {
            let mut previous = 0;
            for step in 0..=200 {
                let marks = max * step as f64 / 200.0;
                let current = rank(grade(marks, max));
                assert!(current >= previous, "grade dropped at {marks}/{max}");
                previous = current;
            }
        }
    }
}
