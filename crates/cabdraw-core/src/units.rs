//! 单位系统
//!
//! 内部统一使用英寸，只在显示和导入导出时转换。
//! 英寸值固定保留 6 位小数，避免毫米往返转换时的浮点漂移。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 每英寸毫米数
pub const MM_PER_INCH: f64 = 25.4;

/// 英寸值的小数精度
const INCH_PRECISION: i32 = 6;

/// 长度单位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LengthUnit {
    /// 英寸 (默认)
    #[default]
    Inches,
    /// 毫米
    Millimeters,
    /// 厘米
    Centimeters,
}

impl LengthUnit {
    /// 获取单位到英寸的转换因子
    pub fn to_inch_factor(&self) -> f64 {
        match self {
            LengthUnit::Inches => 1.0,
            LengthUnit::Millimeters => 1.0 / MM_PER_INCH,
            LengthUnit::Centimeters => 10.0 / MM_PER_INCH,
        }
    }

    /// 获取单位符号
    pub fn symbol(&self) -> &'static str {
        match self {
            LengthUnit::Inches => "\"",
            LengthUnit::Millimeters => "mm",
            LengthUnit::Centimeters => "cm",
        }
    }

    /// 从字符串解析单位
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "in" | "inch" | "inches" | "\"" => Some(LengthUnit::Inches),
            "mm" | "millimeter" | "millimeters" => Some(LengthUnit::Millimeters),
            "cm" | "centimeter" | "centimeters" => Some(LengthUnit::Centimeters),
            _ => None,
        }
    }
}

/// 按固定精度四舍五入
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// 单位转换
pub fn convert(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    let inches = round_to(value * from.to_inch_factor(), INCH_PRECISION);
    inches / to.to_inch_factor()
}

/// 一个带单位的长度
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Dimension {
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    pub fn inches(value: f64) -> Self {
        Self::new(value, LengthUnit::Inches)
    }

    pub fn millimeters(value: f64) -> Self {
        Self::new(value, LengthUnit::Millimeters)
    }

    pub fn centimeters(value: f64) -> Self {
        Self::new(value, LengthUnit::Centimeters)
    }

    /// 转换为英寸（6位小数）
    pub fn to_inches(&self) -> f64 {
        convert(self.value, self.unit, LengthUnit::Inches)
    }

    /// 转换为毫米
    pub fn to_millimeters(&self) -> f64 {
        convert(self.value, self.unit, LengthUnit::Millimeters)
    }

    /// 转换为厘米
    pub fn to_centimeters(&self) -> f64 {
        convert(self.value, self.unit, LengthUnit::Centimeters)
    }

    /// 转换为指定单位
    pub fn convert_to(&self, unit: LengthUnit) -> Self {
        Self::new(convert(self.value, self.unit, unit), unit)
    }

    /// 分数英寸格式，如 `1 1/2"`
    pub fn format_fractional(&self) -> String {
        format_fractional_inches(self.to_inches())
    }

    /// 公制格式，如 `609.6 mm`
    pub fn format_metric(&self) -> String {
        format!("{:.1} mm", self.to_millimeters())
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_fractional())
    }
}

/// 可识别的常用分数
const COMMON_FRACTIONS: [(f64, &str); 5] = [
    (0.0625, "1/16"),
    (0.125, "1/8"),
    (0.25, "1/4"),
    (0.5, "1/2"),
    (0.75, "3/4"),
];

/// 分数匹配容差
const FRACTION_TOLERANCE: f64 = 0.01;

/// 将英寸值格式化为分数英寸文本
///
/// 小数部分匹配 1/16、1/8、1/4、1/2、3/4 之一时输出分数，
/// 否则输出 3 位小数。
pub fn format_fractional_inches(inches: f64) -> String {
    let sign = if inches < 0.0 { "-" } else { "" };
    let value = inches.abs();

    let mut whole = value.floor();
    let mut remainder = value - whole;

    // 接近整数的余数归零/进位
    if remainder < FRACTION_TOLERANCE {
        remainder = 0.0;
    } else if 1.0 - remainder < FRACTION_TOLERANCE {
        whole += 1.0;
        remainder = 0.0;
    }

    if remainder == 0.0 {
        return format!("{}{}\"", sign, whole as i64);
    }

    let fraction = COMMON_FRACTIONS
        .iter()
        .filter(|(v, _)| (remainder - v).abs() < FRACTION_TOLERANCE)
        .min_by(|a, b| (remainder - a.0).abs().total_cmp(&(remainder - b.0).abs()))
        .map(|(_, text)| *text);

    match fraction {
        Some(text) if whole > 0.0 => format!("{}{} {}\"", sign, whole as i64, text),
        Some(text) => format!("{}{}\"", sign, text),
        None => format!("{}{:.3}\"", sign, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        assert!((convert(1.0, LengthUnit::Inches, LengthUnit::Millimeters) - 25.4).abs() < 1e-9);
        assert!((convert(25.4, LengthUnit::Millimeters, LengthUnit::Inches) - 1.0).abs() < 1e-9);
        assert!((convert(2.54, LengthUnit::Centimeters, LengthUnit::Inches) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_inches_are_fixed_precision() {
        let d = Dimension::millimeters(1.0);
        // 1mm = 0.03937007874... 英寸，截断到 6 位
        assert_eq!(d.to_inches(), 0.03937);
    }

    #[test]
    fn test_fractional_formatting() {
        assert_eq!(format_fractional_inches(0.75), "3/4\"");
        assert_eq!(format_fractional_inches(0.5), "1/2\"");
        assert_eq!(format_fractional_inches(1.5), "1 1/2\"");
        assert_eq!(format_fractional_inches(12.75), "12 3/4\"");
        assert_eq!(format_fractional_inches(1.0), "1\"");
        assert_eq!(format_fractional_inches(0.0625), "1/16\"");
        assert_eq!(format_fractional_inches(3.125), "3 1/8\"");
        assert_eq!(format_fractional_inches(34.25), "34 1/4\"");
    }

    #[test]
    fn test_fractional_fallback_to_decimal() {
        assert_eq!(format_fractional_inches(1.3), "1.300\"");
        assert_eq!(format_fractional_inches(2.999), "3\"");
    }

    #[test]
    fn test_dimension_display() {
        assert_eq!(Dimension::inches(23.25).to_string(), "23 1/4\"");
        assert_eq!(Dimension::millimeters(609.6).to_string(), "24\"");
        assert_eq!(Dimension::inches(24.0).format_metric(), "609.6 mm");
    }
}
