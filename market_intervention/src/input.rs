//! Interactive entry of market parameters
//!
//! Prompts are read in a fixed order. The reader is generic over its input and
//! output so the same sequence can be driven from a terminal or from a test buffer.
//! Prompt wording follows the chart's label language.

use crate::chart::LabelLanguage;
use crate::{ControlKind, LinearCurve, MarketError, MarketParameters, PriceControl, Result};
use std::io::{BufRead, Write};

/// Parse a scalar entry, trimming surrounding whitespace
pub fn parse_number(field: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| MarketError::InputFormat {
            field: field.to_string(),
            input: raw.trim().to_string(),
        })
}

/// Text shown before each entry, in prompt order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptText {
    pub demand_intercept: &'static str,
    pub demand_slope: &'static str,
    pub supply_intercept: &'static str,
    pub supply_slope: &'static str,
    pub tax: &'static str,
    pub subsidy: &'static str,
    pub control_kind: &'static str,
    pub ceiling_price: &'static str,
    pub floor_price: &'static str,
}

impl PromptText {
    pub fn english() -> Self {
        PromptText {
            demand_intercept: "Demand intercept a (e.g. 100): ",
            demand_slope: "Demand slope b (e.g. 2): ",
            supply_intercept: "Supply intercept c (e.g. 10): ",
            supply_slope: "Supply slope d (e.g. 1.5): ",
            tax: "Per-unit tax (0 for none): ",
            subsidy: "Per-unit subsidy (0 for none): ",
            control_kind: "Price control (ceiling/최고, floor/최저, none): ",
            ceiling_price: "Ceiling price: ",
            floor_price: "Floor price: ",
        }
    }

    pub fn korean() -> Self {
        PromptText {
            demand_intercept: "수요 절편 a: ",
            demand_slope: "수요 기울기 b: ",
            supply_intercept: "공급 절편 c: ",
            supply_slope: "공급 기울기 d: ",
            tax: "단위당 세금 (0이면 없음): ",
            subsidy: "단위당 보조금 (0이면 없음): ",
            control_kind: "가격 통제 유형 (ceiling/최고, floor/최저, 없음): ",
            ceiling_price: "최고가격 입력: ",
            floor_price: "최저가격 입력: ",
        }
    }

    pub fn for_language(language: LabelLanguage) -> Self {
        match language {
            LabelLanguage::English => Self::english(),
            LabelLanguage::Korean => Self::korean(),
        }
    }
}

pub struct PromptReader<R, W> {
    input: R,
    output: W,
    prompts: PromptText,
}

impl<R: BufRead, W: Write> PromptReader<R, W> {
    /// Reader with English prompts
    pub fn new(input: R, output: W) -> Self {
        PromptReader {
            input,
            output,
            prompts: PromptText::english(),
        }
    }

    pub fn with_language(mut self, language: LabelLanguage) -> Self {
        self.prompts = PromptText::for_language(language);
        self
    }

    /// Print `prompt` and read one line; end of input yields an empty string
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    pub fn read_number(&mut self, field: &str, prompt: &str) -> Result<f64> {
        let line = self.read_line(prompt)?;
        parse_number(field, &line)
    }

    /// Full prompt sequence: four curve coefficients, tax, subsidy, control kind,
    /// and the control price only when a ceiling or floor was chosen.
    pub fn read_scenario(&mut self) -> Result<(MarketParameters, PriceControl)> {
        let prompts = self.prompts.clone();
        let a = self.read_number("demand intercept", prompts.demand_intercept)?;
        let b = self.read_number("demand slope", prompts.demand_slope)?;
        let c = self.read_number("supply intercept", prompts.supply_intercept)?;
        let d = self.read_number("supply slope", prompts.supply_slope)?;
        let tax = self.read_number("tax", prompts.tax)?;
        let subsidy = self.read_number("subsidy", prompts.subsidy)?;

        let token = self.read_line(prompts.control_kind)?;
        let control = match ControlKind::from_token(&token) {
            ControlKind::Ceiling => {
                let price = self.read_number("ceiling price", prompts.ceiling_price)?;
                PriceControl::Ceiling(price)
            }
            ControlKind::Floor => {
                let price = self.read_number("floor price", prompts.floor_price)?;
                PriceControl::Floor(price)
            }
            ControlKind::None => PriceControl::None,
        };
        control.validate()?;

        let params = MarketParameters::new(
            LinearCurve::new(a, b),
            LinearCurve::new(c, d),
            tax,
            subsidy,
        )?;
        Ok((params, control))
    }
}
