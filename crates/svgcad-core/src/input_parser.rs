//! 命令行输入解析
//!
//! 支持的格式：
//! - 绝对坐标: `100,50`
//! - 相对坐标: `@100,50`（相对最后一个点）
//! - 极坐标: `@100<45`（相对）或 `100<45`（长度 + 角度）
//! - 数值: `100`
//! - 角度: `<45`

use crate::math::Point2;
use thiserror::Error;

/// 解析后的输入值
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    /// 点坐标
    Point(Point2),
    /// 数值（长度、半径、比例、角度度数等，由命令解释）
    Number(f64),
    /// 角度（弧度）
    Angle(f64),
    /// 长度和角度（弧度）
    LengthAngle { length: f64, angle: f64 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Missing value: {0}")]
    MissingValue(String),
}

/// 输入解析器
pub struct InputParser;

impl InputParser {
    /// 解析输入字符串
    ///
    /// `reference_point` 用于相对坐标和相对极坐标。
    pub fn parse(input: &str, reference_point: Option<Point2>) -> Result<InputValue, ParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseError::MissingValue("empty input".to_string()));
        }

        let (relative, body) = match input.strip_prefix('@') {
            Some(rest) => (true, rest.trim()),
            None => (false, input),
        };

        let reference = || {
            reference_point.ok_or_else(|| {
                ParseError::MissingValue("reference point required for relative input".to_string())
            })
        };

        if let Some((length_str, angle_str)) = body.rsplit_once('<') {
            let angle = parse_number(angle_str, "angle")?.to_radians();
            if length_str.trim().is_empty() {
                return Ok(InputValue::Angle(angle));
            }
            let length = parse_number(length_str, "length")?;
            return if relative {
                Ok(InputValue::Point(polar_to_point(reference()?, length, angle)))
            } else {
                Ok(InputValue::LengthAngle { length, angle })
            };
        }

        if let Some((x_str, y_str)) = body.split_once(',') {
            let x = parse_number(x_str, "X coordinate")?;
            let y = parse_number(y_str, "Y coordinate")?;
            return if relative {
                let origin = reference()?;
                Ok(InputValue::Point(Point2::new(origin.x + x, origin.y + y)))
            } else {
                Ok(InputValue::Point(Point2::new(x, y)))
            };
        }

        if relative {
            return Err(ParseError::InvalidFormat(format!(
                "relative input needs 'dx,dy' or 'd<angle': {}",
                input
            )));
        }

        parse_number(body, "value").map(InputValue::Number)
    }

    /// 解析为点坐标
    ///
    /// 长度 + 角度基于参考点换算；单独的数值沿 X 轴正方向。
    pub fn parse_point(input: &str, reference_point: Option<Point2>) -> Result<Point2, ParseError> {
        let missing = || {
            ParseError::MissingValue("reference point required for length input".to_string())
        };
        match Self::parse(input, reference_point)? {
            InputValue::Point(p) => Ok(p),
            InputValue::LengthAngle { length, angle } => {
                let origin = reference_point.ok_or_else(missing)?;
                Ok(polar_to_point(origin, length, angle))
            }
            InputValue::Number(length) => {
                let origin = reference_point.ok_or_else(missing)?;
                Ok(Point2::new(origin.x + length, origin.y))
            }
            InputValue::Angle(_) => Err(ParseError::InvalidFormat(
                "an angle alone is not a point".to_string(),
            )),
        }
    }

    /// 解析单个数值
    pub fn parse_value(input: &str) -> Result<f64, ParseError> {
        parse_number(input, "value")
    }
}

fn parse_number(text: &str, what: &str) -> Result<f64, ParseError> {
    let text = text.trim();
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ParseError::InvalidFormat(format!("invalid {}: '{}'", what, text))),
    }
}

/// 将极坐标转换为点
fn polar_to_point(origin: Point2, distance: f64, angle: f64) -> Point2 {
    Point2::new(
        origin.x + distance * angle.cos(),
        origin.y + distance * angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absolute_coordinate() {
        let result = InputParser::parse("100,50", None).unwrap();
        assert_eq!(result, InputValue::Point(Point2::new(100.0, 50.0)));
    }

    #[test]
    fn test_parse_relative_coordinate() {
        let result = InputParser::parse("@100, 50", Some(Point2::new(10.0, 20.0))).unwrap();
        assert_eq!(result, InputValue::Point(Point2::new(110.0, 70.0)));
        assert!(matches!(
            InputParser::parse("@1,1", None),
            Err(ParseError::MissingValue(_))
        ));
    }

    #[test]
    fn test_parse_polar_relative() {
        let result = InputParser::parse("@100<45", Some(Point2::origin())).unwrap();
        match result {
            InputValue::Point(p) => {
                let expected = 100.0 * 45.0_f64.to_radians().cos();
                assert!((p.x - expected).abs() < 1e-10);
                assert!((p.y - expected).abs() < 1e-10);
            }
            other => panic!("Expected Point, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_length_angle_and_angle() {
        match InputParser::parse("100<90", None).unwrap() {
            InputValue::LengthAngle { length, angle } => {
                assert_eq!(length, 100.0);
                assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-10);
            }
            other => panic!("Expected LengthAngle, got {:?}", other),
        }
        assert!(matches!(InputParser::parse("<45", None), Ok(InputValue::Angle(_))));
    }

    #[test]
    fn test_parse_number_and_garbage() {
        assert_eq!(InputParser::parse("2.5", None), Ok(InputValue::Number(2.5)));
        assert!(InputParser::parse("abc", None).is_err());
        assert!(InputParser::parse("NaN", None).is_err());
        assert!(InputParser::parse("   ", None).is_err());
    }

    #[test]
    fn test_parse_point_from_length() {
        let p = InputParser::parse_point("5", Some(Point2::new(1.0, 1.0))).unwrap();
        assert_eq!(p, Point2::new(6.0, 1.0));
        assert!(InputParser::parse_point("5", None).is_err());
    }
}
