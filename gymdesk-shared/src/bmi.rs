/// BMI derivation from body metrics
///
/// `bmi = weight_kg / (height_m)^2`. Height is recorded in centimeters;
/// a missing or zero height means BMI cannot be computed.

/// Computes BMI from weight in kilograms and height in centimeters
pub fn bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if weight_kg <= 0.0 || height_cm <= 0.0 {
        return None;
    }
    let h = height_cm / 100.0;
    Some(weight_kg / (h * h))
}

/// BMI classification bands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiBand {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiBand {
    /// Band boundaries: <18.5, [18.5, 24), [24, 28), >=28
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiBand::Underweight
        } else if bmi < 24.0 {
            BmiBand::Normal
        } else if bmi < 28.0 {
            BmiBand::Overweight
        } else {
            BmiBand::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiBand::Underweight => "underweight",
            BmiBand::Normal => "normal",
            BmiBand::Overweight => "overweight",
            BmiBand::Obese => "obese",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_computation() {
        // 70 kg at 175 cm -> 22.86
        let value = bmi(70.0, 175.0).unwrap();
        assert!((value - 22.857).abs() < 0.01);
    }

    #[test]
    fn test_bmi_missing_height() {
        assert!(bmi(70.0, 0.0).is_none());
        assert!(bmi(70.0, -1.0).is_none());
        assert!(bmi(0.0, 175.0).is_none());
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(BmiBand::classify(18.4), BmiBand::Underweight);
        assert_eq!(BmiBand::classify(18.5), BmiBand::Normal);
        assert_eq!(BmiBand::classify(23.9), BmiBand::Normal);
        assert_eq!(BmiBand::classify(24.0), BmiBand::Overweight);
        assert_eq!(BmiBand::classify(27.9), BmiBand::Overweight);
        assert_eq!(BmiBand::classify(28.0), BmiBand::Obese);
    }

    #[test]
    fn test_band_labels() {
        assert_eq!(BmiBand::Underweight.label(), "underweight");
        assert_eq!(BmiBand::Obese.label(), "obese");
    }
}
