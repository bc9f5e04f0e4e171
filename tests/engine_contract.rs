//! 引擎调度与参数集契约测试，同时校验公式目录与引擎的一致性。
use std::str::FromStr;

use slurry_pipeline_toolbox::catalog;
use slurry_pipeline_toolbox::engine::{
    self, CalcError, FormulaId, ParamSet, PrimaryResult, ValueSource,
};

#[test]
fn formula_id_round_trips_through_strings() {
    for id in FormulaId::ALL {
        assert_eq!(FormulaId::from_str(id.as_str()).expect("round trip"), id);
    }
}

#[test]
fn unknown_formula_id_is_reported() {
    match engine::calculate("durand", &ParamSet::new()) {
        Err(CalcError::UnknownFormula(id)) => assert_eq!(id, "durand"),
        other => panic!("expected unknown formula, got {other:?}"),
    }
    let err = FormulaId::from_str("durand").expect_err("unknown id");
    assert_eq!(err.to_string(), "未知的公式ID: durand");
}

#[test]
fn calculate_matches_direct_evaluate() {
    let params = ParamSet::new()
        .with("C_w", 0.3)
        .with("rho_g", 2.65)
        .with("rho_s", 1.0);
    let by_id = engine::calculate("density_mixing", &params).expect("by id");
    let direct = engine::evaluate(FormulaId::DensityMixing, &params).expect("direct");
    assert_eq!(by_id.primary, direct.primary);
    assert_eq!(by_id.intermediate, direct.intermediate);
}

#[test]
fn param_set_preserves_insertion_order_and_overwrites() {
    let mut params = ParamSet::new();
    params.set("D", 0.5);
    params.set("rho_g", 2650.0);
    params.set("D", 0.6);

    let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["D", "rho_g"]);
    assert_eq!(params.get("D"), Some(0.6));
    assert_eq!(params.len(), 2);
}

#[test]
fn resolve_records_value_source() {
    let explicit = ParamSet::new().with("K", 1.3).with("g", 9.8);
    let resolved = explicit.resolve("K", 1.1);
    assert_eq!(resolved.value, 1.3);
    assert_eq!(resolved.source, ValueSource::Explicit);
    let gravity = explicit.resolve_gravity();
    assert_eq!(gravity.value, 9.8);
    assert_eq!(gravity.source, ValueSource::Explicit);

    let empty = ParamSet::new();
    let resolved = empty.resolve("K", 1.1);
    assert_eq!(resolved.value, 1.1);
    assert_eq!(resolved.source, ValueSource::FormulaDefault);
    let gravity = empty.resolve_gravity();
    assert_eq!(gravity.value, engine::GRAVITY_DEFAULT);
    assert_eq!(gravity.source, ValueSource::GlobalDefault);
}

#[test]
fn require_reports_configured_message() {
    let params = ParamSet::new().with("D", 0.5);
    let err = params
        .require(["D", "rho_g"], "示例公式需要所有参数：D, rho_g")
        .expect_err("missing rho_g");
    assert_eq!(err.to_string(), "示例公式需要所有参数：D, rho_g");
}

#[test]
fn primary_result_exposes_stable_keys() {
    assert_eq!(PrimaryResult::CriticalVelocity(Some(1.0)).key(), "Vc");
    assert_eq!(PrimaryResult::HeadLoss(1.0).key(), "i_k");
    assert_eq!(PrimaryResult::SlurryDensity(1.0).key(), "rho_k");
    assert_eq!(PrimaryResult::FrictionFactor(1.0).key(), "lambda_coef");
    assert_eq!(PrimaryResult::ConditionMet(true).key(), "condition_met");
    assert_eq!(PrimaryResult::ConditionMet(true).number(), None);
    assert_eq!(PrimaryResult::CriticalVelocity(None).number(), None);
}

#[test]
fn catalog_covers_every_formula() {
    assert_eq!(catalog::all().count(), FormulaId::ALL.len());
    for id in FormulaId::ALL {
        assert_eq!(catalog::find(id).id, id);
    }
}

#[test]
fn catalog_required_keys_match_engine_requirements() {
    let expectations: [(FormulaId, &[&str]); 8] = [
        (
            FormulaId::LiuDezhong,
            &["D", "rho_g", "rho_k", "omega", "Cv", "omega_s"],
        ),
        (FormulaId::Wasp, &["D", "rho_g", "rho_k", "Cv", "d85"]),
        (
            FormulaId::FeiXiangjun,
            &["D", "rho_g", "rho_k", "Cv", "omega", "d90", "lambda_coef"],
        ),
        (FormulaId::KronodzePressure, &["G", "W", "rho_g"]),
        (
            FormulaId::FrictionLoss,
            &["lambda_coef", "V", "rho_k", "D", "rho_s"],
        ),
        (FormulaId::DensityMixing, &["C_w", "rho_g", "rho_s"]),
        (FormulaId::DarcyFriction, &["Re"]),
        (
            FormulaId::SlurryAccelEnergy,
            &["Z1", "Z2", "H1", "H2", "i", "L"],
        ),
    ];

    for (id, expected) in expectations {
        let spec = catalog::find(id);
        let mut required: Vec<&str> = spec.required_keys().collect();
        let mut expected: Vec<&str> = expected.to_vec();
        required.sort_unstable();
        expected.sort_unstable();
        assert_eq!(required, expected, "required keys for {id:?}");
    }
}

#[test]
fn catalog_required_keys_suffice_for_evaluation() {
    // 目录声明的必填集合应恰好让引擎通过缺参检查。
    // 值取 0.5 会触发部分公式的范围检查，但不应再出现缺参错误。
    for spec in catalog::all() {
        let mut params = ParamSet::new();
        for key in spec.required_keys() {
            params.set(key, 0.5);
        }
        match engine::evaluate(spec.id, &params) {
            Err(CalcError::MissingParameter(msg)) => {
                panic!("{:?} still missing parameters: {msg}", spec.id);
            }
            _ => {}
        }
    }
}

#[test]
fn catalog_defaults_match_engine_defaults() {
    let liu = catalog::find(FormulaId::LiuDezhong);
    let gravity = liu
        .params
        .iter()
        .find(|p| p.key == "g")
        .expect("gravity param");
    assert_eq!(gravity.default, Some(engine::GRAVITY_DEFAULT));
    let coefficient = liu
        .params
        .iter()
        .find(|p| p.key == "coefficient_9_5")
        .expect("coefficient param");
    assert_eq!(coefficient.default, Some(9.5));

    let kronodze = catalog::find(FormulaId::KronodzePressure);
    let dp = kronodze
        .params
        .iter()
        .find(|p| p.key == "dp")
        .expect("dp param");
    assert!(dp.optional);
    assert_eq!(dp.default, None);

    let darcy = catalog::find(FormulaId::DarcyFriction);
    let diameter = darcy
        .params
        .iter()
        .find(|p| p.key == "D")
        .expect("darcy D param");
    assert!(diameter.optional);
}
