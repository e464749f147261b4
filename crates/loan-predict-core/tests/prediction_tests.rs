use loan_predict_core::prediction::{
    evaluate, predict, risk_score, LoanApplicationForm, LoanRequest, RiskCategory, RiskPolicy,
};
use loan_predict_core::time_value::round_currency;
use loan_predict_core::LoanPredictError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn sample_loans() -> Vec<LoanRequest> {
    vec![
        LoanRequest::new(dec!(500_000), dec!(10), 5, 650),
        LoanRequest::new(dec!(100_000), dec!(12), 1, 720),
        LoanRequest::new(dec!(1_000_000), dec!(8), 20, 700),
        LoanRequest::new(dec!(250_000), dec!(7.5), 30, 780),
        LoanRequest::new(dec!(10_000), dec!(13), 2, 610),
        LoanRequest::new(dec!(2_000_000), dec!(6.5), 15, 810),
    ]
}

// ===========================================================================
// Installment
// ===========================================================================

#[test]
fn test_known_installments() {
    let expected = [
        dec!(10623.52),
        dec!(8884.88),
        dec!(8364.40),
        dec!(1748.04),
        dec!(475.42),
        dec!(17422.15),
    ];
    for (loan, want) in sample_loans().iter().zip(expected) {
        let result = predict(loan).unwrap();
        assert_eq!(result.installment_amount, want, "loan {:?}", loan);
    }
}

#[test]
fn test_positive_rate_pays_interest() {
    for loan in sample_loans() {
        let result = predict(&loan).unwrap();
        let months = Decimal::from(loan.tenure_years * 12);
        assert!(result.installment_amount > Decimal::ZERO);
        assert!(
            result.installment_amount * months > loan.principal,
            "no interest charged for {:?}",
            loan
        );
    }
}

#[test]
fn test_zero_rate_matches_straight_line() {
    for (principal, years) in [(dec!(120_000), 10), (dec!(100_000), 3), (dec!(999.99), 7)] {
        let loan = LoanRequest::new(principal, Decimal::ZERO, years, 700);
        let result = predict(&loan).unwrap();
        let expected = round_currency(principal / Decimal::from(years * 12));
        assert_eq!(result.installment_amount, expected);
    }
}

#[test]
fn test_zero_tenure_always_invalid() {
    for loan in sample_loans() {
        let zero = LoanRequest {
            tenure_years: 0,
            ..loan
        };
        match predict(&zero) {
            Err(LoanPredictError::InvalidInput { field, .. }) => assert_eq!(field, "tenure_years"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }
}

#[test]
fn test_extreme_rate_and_tenure_is_an_error_not_a_panic() {
    let loan = LoanRequest::new(dec!(1_000_000), dec!(1000), 100, 700);
    assert!(predict(&loan).unwrap_err().is_invalid_input());
}

// ===========================================================================
// Risk
// ===========================================================================

#[test]
fn test_reference_scenario_is_medium_risk() {
    let loan = LoanRequest::new(dec!(500_000), dec!(10), 5, 650);
    assert_eq!(risk_score(&loan, &RiskPolicy::default()), 1);
    assert_eq!(predict(&loan).unwrap().risk_category, RiskCategory::Medium);
}

#[test]
fn test_risk_monotone_in_credit_score() {
    for loan in sample_loans() {
        let good = LoanRequest {
            credit_score: 760,
            ..loan.clone()
        };
        let poor = LoanRequest {
            credit_score: 640,
            ..loan
        };
        let good_cat = predict(&good).unwrap().risk_category;
        let poor_cat = predict(&poor).unwrap().risk_category;
        assert!(poor_cat >= good_cat, "{poor_cat} < {good_cat}");
    }
}

#[test]
fn test_risk_tiers() {
    let low = LoanRequest::new(dec!(200_000), dec!(9), 10, 760);
    let medium = LoanRequest::new(dec!(1_500_000), dec!(9), 10, 760);
    let high = LoanRequest::new(dec!(1_500_000), dec!(14), 10, 760);

    assert_eq!(predict(&low).unwrap().risk_category, RiskCategory::Low);
    assert_eq!(predict(&medium).unwrap().risk_category, RiskCategory::Medium);
    assert_eq!(predict(&high).unwrap().risk_category, RiskCategory::High);
}

// ===========================================================================
// Boundary and envelope
// ===========================================================================

#[test]
fn test_form_to_prediction() {
    let form = LoanApplicationForm {
        loan_amount: Some("500000".into()),
        annual_interest_rate: Some("10".into()),
        loan_tenure_years: Some("5".into()),
        credit_score: Some("650".into()),
    };
    let request = LoanRequest::try_from(&form).unwrap();
    assert_eq!(predict(&request).unwrap().installment_amount, dec!(10623.52));
}

#[test]
fn test_request_json_round_trip_through_serde() {
    let json = r#"{"principal": "500000", "annual_rate_percent": "10", "tenure_years": 5, "credit_score": 650}"#;
    let request: LoanRequest = serde_json::from_str(json).unwrap();
    let result = predict(&request).unwrap();

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["risk_category"], "Medium");
    assert_eq!(value["installment_amount"], "10623.52");
}

#[test]
fn test_evaluate_envelope() {
    let loan = LoanRequest::new(dec!(500_000), dec!(10), 5, 650);
    let output = evaluate(&loan).unwrap();

    assert_eq!(output.result, predict(&loan).unwrap());
    assert!(output.methodology.contains("amortization"));
    assert_eq!(output.metadata.precision, "rust_decimal_128bit");
    assert!(output.warnings.is_empty());
}

#[test]
fn test_concurrent_predictions_agree() {
    let loan = LoanRequest::new(dec!(500_000), dec!(10), 5, 650);
    let expected = predict(&loan).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let loan = loan.clone();
            std::thread::spawn(move || predict(&loan).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
