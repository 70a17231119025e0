//! 宽松的数字反序列化
//!
//! 前端表单提交的 id 与分数既可能是数字也可能是数字字符串，空字符串视为未提供。

use serde::de::{Deserializer, Error, Unexpected, Visitor};
use std::fmt;

struct OptionalI64Visitor;

impl<'de> Visitor<'de> for OptionalI64Visitor {
    type Value = Option<i64>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer or a string containing an integer")
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Some(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        if value <= i64::MAX as u64 {
            Ok(Some(value as i64))
        } else {
            Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
        }
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
            Ok(Some(value as i64))
        } else {
            Err(Error::invalid_value(Unexpected::Float(value), &self))
        }
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse()
            .map(Some)
            .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
    }
}

struct OptionalF64Visitor;

impl<'de> Visitor<'de> for OptionalF64Visitor {
    type Value = Option<f64>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number or a string containing a number")
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Some(value as f64))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Some(value as f64))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Some(value))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        match trimmed.parse::<f64>() {
            Ok(number) if number.is_finite() => Ok(Some(number)),
            _ => Err(Error::invalid_value(Unexpected::Str(value), &self)),
        }
    }
}

/// 反序列化可选 id：接受整数或整数字符串
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(OptionalI64Visitor)
}

/// 反序列化可选分数：接受数字或数字字符串
pub fn deserialize_optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(OptionalF64Visitor)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Body {
        #[serde(default, deserialize_with = "super::deserialize_optional_i64")]
        class_id: Option<i64>,
        #[serde(default, deserialize_with = "super::deserialize_optional_f64")]
        max_marks: Option<f64>,
    }

    #[test]
    fn test_accepts_numbers_and_strings() {
        let body: Body = serde_json::from_str(r#"{"classId": 3, "maxMarks": 80}"#).unwrap();
        assert_eq!(body.class_id, Some(3));
        assert_eq!(body.max_marks, Some(80.0));

        let body: Body = serde_json::from_str(r#"{"classId": "12", "maxMarks": "72.5"}"#).unwrap();
        assert_eq!(body.class_id, Some(12));
        assert_eq!(body.max_marks, Some(72.5));
    }

    #[test]
    fn test_missing_null_and_empty_are_none() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.class_id, None);

        let body: Body = serde_json::from_str(r#"{"classId": null, "maxMarks": ""}"#).unwrap();
        assert_eq!(body.class_id, None);
        assert_eq!(body.max_marks, None);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Body>(r#"{"classId": "abc"}"#).is_err());
        assert!(serde_json::from_str::<Body>(r#"{"classId": 1.5}"#).is_err());
        assert!(serde_json::from_str::<Body>(r#"{"maxMarks": "NaN"}"#).is_err());
    }

    #[test]
    fn test_query_string_ids() {
        let body: Body = parse_query("classId=5");
        assert_eq!(body.class_id, Some(5));
    }

    fn parse_query(query: &str) -> Body {
        actix_web::web::Query::<Body>::from_query(query)
            .unwrap()
            .into_inner()
    }
}
