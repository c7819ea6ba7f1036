//! 結果表示用の値を計算する
//!
//! 分類結果と重量から、確信度(%)・推定価格・リサイクルのヒントを導出する。
//! 純粋関数なので、重量の変更時は分類をやり直さずに再計算できる。

use crate::reference::ReferenceData;
use crate::types::ClassificationResult;
use serde::Serialize;

/// 価格表示の通貨
pub const CURRENCY_SUFFIX: &str = "Birr";

/// 重量の既定値（kg）
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// 重量入力
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightInput(f64);

impl WeightInput {
    /// 入力文字列を解釈する
    ///
    /// 空・数値以外・負数・非有限値は既定値1。0はそのまま0として扱う。
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Self(value),
            _ => Self::default(),
        }
    }

    pub fn kilograms(self) -> f64 {
        self.0
    }
}

impl Default for WeightInput {
    fn default() -> Self {
        Self(DEFAULT_WEIGHT)
    }
}

/// 上位候補の表示用
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternativeView {
    pub label: String,
    pub confidence_percent: u8,
}

/// 結果エリアの表示内容
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    pub label: String,
    pub confidence_percent: u8,
    /// 確信度バーの幅（CSS）
    pub bar_width: String,
    pub unit_price: f64,
    pub weight: f64,
    pub value: f64,
    pub value_text: String,
    pub tip: String,
    pub advice: Option<String>,
    pub alternatives: Vec<AlternativeView>,
}

/// 確信度を0〜100の整数に丸める
pub fn confidence_percent(confidence: f64) -> u8 {
    (confidence.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// 小数点以下2桁に丸める
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// "75.00 Birr" 形式
pub fn format_value(value: f64) -> String {
    format!("{:.2} {}", value, CURRENCY_SUFFIX)
}

/// 推定価格 = 重量 × 単価（小数点以下2桁）
pub fn estimate_value(reference: &ReferenceData, label: &str, weight: WeightInput) -> f64 {
    round_cents(weight.kilograms() * reference.unit_price(label))
}

/// 分類結果と重量から表示内容を作る
pub fn present(
    result: &ClassificationResult,
    weight: WeightInput,
    reference: &ReferenceData,
) -> Presentation {
    let percent = confidence_percent(result.confidence);
    let value = estimate_value(reference, &result.label, weight);

    Presentation {
        label: result.label.clone(),
        confidence_percent: percent,
        bar_width: format!("{}%", percent),
        unit_price: reference.unit_price(&result.label),
        weight: weight.kilograms(),
        value,
        value_text: format_value(value),
        tip: reference.tip(&result.label).to_string(),
        advice: result.advice.clone(),
        alternatives: result
            .alternatives
            .iter()
            .map(|alt| AlternativeView {
                label: alt.label.clone(),
                confidence_percent: confidence_percent(alt.confidence),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::GENERIC_TIP;
    use proptest::prelude::*;

    fn reference() -> ReferenceData {
        ReferenceData::builtin().expect("組み込みデータの読み込み失敗")
    }

    #[test]
    fn test_weight_parse() {
        assert_eq!(WeightInput::parse("2.5").kilograms(), 2.5);
        assert_eq!(WeightInput::parse(" 3 ").kilograms(), 3.0);
        assert_eq!(WeightInput::parse("0").kilograms(), 0.0);
        assert_eq!(WeightInput::parse("").kilograms(), 1.0);
        assert_eq!(WeightInput::parse("abc").kilograms(), 1.0);
        assert_eq!(WeightInput::parse("-2").kilograms(), 1.0);
        assert_eq!(WeightInput::parse("NaN").kilograms(), 1.0);
        assert_eq!(WeightInput::parse("inf").kilograms(), 1.0);
    }

    #[test]
    fn test_present_metal() {
        let result = ClassificationResult::new("Metal", 0.93);
        let shown = present(&result, WeightInput::default(), &reference());

        assert_eq!(shown.label, "Metal");
        assert_eq!(shown.confidence_percent, 93);
        assert_eq!(shown.bar_width, "93%");
        assert_eq!(shown.value_text, "75.00 Birr");
        assert!(shown.tip.starts_with("Rinse cans thoroughly"));
    }

    #[test]
    fn test_present_recomputes_for_weight() {
        let result = ClassificationResult::new("Metal", 0.93);
        let shown = present(&result, WeightInput::parse("2.5"), &reference());
        assert_eq!(shown.value, 187.5);
        assert_eq!(shown.value_text, "187.50 Birr");
    }

    #[test]
    fn test_present_unknown_label() {
        let result = ClassificationResult::new("unknown-material", 0.4);
        let shown = present(&result, WeightInput::parse("10"), &reference());
        assert_eq!(shown.value_text, "0.00 Birr");
        assert_eq!(shown.unit_price, 0.0);
        assert_eq!(shown.tip, GENERIC_TIP);
    }

    #[test]
    fn test_present_rounds_value() {
        // 22.5 × 0.333 = 7.4925
        let result = ClassificationResult::new("paper", 0.5);
        let shown = present(&result, WeightInput::parse("0.333"), &reference());
        assert_eq!(shown.value_text, "7.49 Birr");
    }

    #[test]
    fn test_confidence_percent_rounding() {
        assert_eq!(confidence_percent(0.0), 0);
        assert_eq!(confidence_percent(0.005), 1);
        assert_eq!(confidence_percent(0.994), 99);
        assert_eq!(confidence_percent(1.0), 100);
    }

    proptest! {
        #[test]
        fn prop_known_label_value(weight in 0.0f64..10_000.0, idx in 0usize..13) {
            let reference = reference();
            let (label, price) = reference.prices.iter().nth(idx).unwrap();
            let result = ClassificationResult::new(label, 0.5);
            let shown = present(&result, WeightInput::parse(&weight.to_string()), &reference);
            prop_assert_eq!(shown.value, round_cents(weight * price));
        }

        #[test]
        fn prop_unknown_label_is_zero(weight in 0.0f64..10_000.0) {
            let result = ClassificationResult::new("unknown-material", 0.5);
            let shown = present(&result, WeightInput::parse(&weight.to_string()), &reference());
            prop_assert_eq!(shown.value_text, "0.00 Birr");
        }

        #[test]
        fn prop_present_is_idempotent(weight in 0.0f64..1_000.0, confidence in 0.0f64..=1.0) {
            let reference = reference();
            let result = ClassificationResult::new("plastic", confidence);
            let weight = WeightInput::parse(&weight.to_string());
            prop_assert_eq!(present(&result, weight, &reference), present(&result, weight, &reference));
        }

        #[test]
        fn prop_bar_width_matches_percent(confidence in 0.0f64..=1.0) {
            let result = ClassificationResult::new("glass", confidence);
            let shown = present(&result, WeightInput::default(), &reference());
            prop_assert!(shown.confidence_percent <= 100);
            prop_assert_eq!(shown.bar_width, format!("{}%", shown.confidence_percent));
        }
    }
}
