//! 辅助水力计算回归测试。
use slurry_pipeline_toolbox::engine::{
    self, CalcError, FormulaId, ParamSet, PrimaryResult, TermValue,
};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

fn regime_of(record: &engine::CalcRecord) -> &'static str {
    record
        .intermediate
        .iter()
        .find_map(|term| match term.value {
            TermValue::Text(text) if term.key == "flow_regime" => Some(text),
            _ => None,
        })
        .expect("flow_regime")
}

#[test]
fn friction_loss_reference_case() {
    // λ = 0.03, V = 2.5 m/s, ρk = 1.35, D = 0.2 m, ρs = 1.0
    let params = ParamSet::new()
        .with("lambda_coef", 0.03)
        .with("V", 2.5)
        .with("rho_k", 1.35)
        .with("D", 0.2)
        .with("rho_s", 1.0);
    let record = engine::evaluate(FormulaId::FrictionLoss, &params).expect("friction");

    assert_eq!(record.unit, "mH₂O/m");
    match record.primary {
        PrimaryResult::HeadLoss(i_k) => assert_close("i_k", i_k, 0.064507, 1e-6),
        other => panic!("expected head loss, got {other:?}"),
    }
    assert_close(
        "numerator",
        record.intermediate_number("numerator").expect("num"),
        8.4375,
        1e-6,
    );
    assert_close(
        "denominator",
        record.intermediate_number("denominator").expect("den"),
        3.924,
        1e-6,
    );
}

#[test]
fn friction_loss_rejects_zero_diameter() {
    let params = ParamSet::new()
        .with("lambda_coef", 0.03)
        .with("V", 2.5)
        .with("rho_k", 1.35)
        .with("D", 0.0)
        .with("rho_s", 1.0);
    match engine::evaluate(FormulaId::FrictionLoss, &params) {
        Err(CalcError::Domain(msg)) => assert_eq!(msg, "D、ρ_s、g 不能为0"),
        other => panic!("expected domain error, got {other:?}"),
    }
}

#[test]
fn density_mixing_reference_case() {
    // C_w = 0.3, ρg = 2.65, ρs = 1.0 t/m³
    let params = ParamSet::new()
        .with("C_w", 0.3)
        .with("rho_g", 2.65)
        .with("rho_s", 1.0);
    let record = engine::evaluate(FormulaId::DensityMixing, &params).expect("density");

    assert_eq!(record.unit, "t/m³");
    match record.primary {
        PrimaryResult::SlurryDensity(rho) => assert_close("rho_k", rho, 1.229698, 1e-6),
        other => panic!("expected slurry density, got {other:?}"),
    }
    assert_close(
        "denom",
        record.intermediate_number("denom").expect("denom"),
        0.813208,
        1e-6,
    );
}

#[test]
fn density_mixing_degenerates_at_concentration_bounds() {
    // C_w = 0 退化为清水密度，C_w = 1 退化为固体密度
    let water = ParamSet::new()
        .with("C_w", 0.0)
        .with("rho_g", 2.65)
        .with("rho_s", 1.0);
    let record = engine::evaluate(FormulaId::DensityMixing, &water).expect("C_w=0");
    match record.primary {
        PrimaryResult::SlurryDensity(rho) => assert_close("rho_k@0", rho, 1.0, 1e-9),
        other => panic!("expected slurry density, got {other:?}"),
    }

    let solids = ParamSet::new()
        .with("C_w", 1.0)
        .with("rho_g", 2.65)
        .with("rho_s", 1.0);
    let record = engine::evaluate(FormulaId::DensityMixing, &solids).expect("C_w=1");
    match record.primary {
        PrimaryResult::SlurryDensity(rho) => assert_close("rho_k@1", rho, 2.65, 1e-9),
        other => panic!("expected slurry density, got {other:?}"),
    }
}

#[test]
fn density_mixing_rejects_out_of_range_concentration() {
    let params = ParamSet::new()
        .with("C_w", 1.2)
        .with("rho_g", 2.65)
        .with("rho_s", 1.0);
    match engine::evaluate(FormulaId::DensityMixing, &params) {
        Err(CalcError::Domain(msg)) => assert_eq!(msg, "质量浓度 C_w 应在 0～1 之间"),
        other => panic!("expected domain error, got {other:?}"),
    }
}

#[test]
fn darcy_laminar_uses_64_over_re() {
    let params = ParamSet::new().with("Re", 2000.0);
    let record = engine::evaluate(FormulaId::DarcyFriction, &params).expect("laminar");

    assert_eq!(record.unit, "");
    match record.primary {
        PrimaryResult::FrictionFactor(lam) => assert_close("lambda", lam, 0.032, 1e-6),
        other => panic!("expected friction factor, got {other:?}"),
    }
    assert_eq!(regime_of(&record), "层流");
    // 层流不依赖管径与粗糙度
    assert!(record.intermediate_number("eps_D").is_none());
}

#[test]
fn darcy_turbulent_swamee_jain() {
    // Re = 10000, D = 0.1 m，粗糙度取默认 0.0002 m
    let params = ParamSet::new().with("Re", 10000.0).with("D", 0.1);
    let record = engine::evaluate(FormulaId::DarcyFriction, &params).expect("turbulent");

    match record.primary {
        PrimaryResult::FrictionFactor(lam) => assert_close("lambda", lam, 0.034222, 1e-6),
        other => panic!("expected friction factor, got {other:?}"),
    }
    assert_eq!(regime_of(&record), "湍流");
    assert_close(
        "eps_D",
        record.intermediate_number("eps_D").expect("eps_D"),
        0.002,
        1e-6,
    );
}

#[test]
fn darcy_turbulent_requires_diameter() {
    let params = ParamSet::new().with("Re", 10000.0);
    match engine::evaluate(FormulaId::DarcyFriction, &params) {
        Err(CalcError::MissingParameter(msg)) => assert_eq!(msg, "湍流时需提供管道内径 D"),
        other => panic!("expected missing parameter, got {other:?}"),
    }
}

#[test]
fn darcy_rejects_nonpositive_reynolds() {
    let zero = ParamSet::new().with("Re", 0.0);
    assert!(matches!(
        engine::evaluate(FormulaId::DarcyFriction, &zero),
        Err(CalcError::Domain(_))
    ));
    let absent = ParamSet::new();
    assert!(matches!(
        engine::evaluate(FormulaId::DarcyFriction, &absent),
        Err(CalcError::MissingParameter(_))
    ));
}

fn energy_params(i: f64) -> ParamSet {
    // Z₁+H₁ = 15, Z₂+H₂ = 12，总水头差 3 m
    ParamSet::new()
        .with("Z1", 10.0)
        .with("H1", 5.0)
        .with("Z2", 8.0)
        .with("H2", 4.0)
        .with("i", i)
        .with("L", 20.0)
}

#[test]
fn energy_check_detects_acceleration_condition() {
    let record = engine::evaluate(FormulaId::SlurryAccelEnergy, &energy_params(0.1))
        .expect("energy met");
    assert_eq!(record.primary, PrimaryResult::ConditionMet(true));
    assert_close(
        "head_diff",
        record.intermediate_number("head_diff").expect("head"),
        3.0,
        1e-9,
    );
    assert_close(
        "friction_loss_total",
        record.intermediate_number("friction_loss_total").expect("fric"),
        2.0,
        1e-9,
    );

    // 摩阻损失超过水头差时条件不成立
    let record = engine::evaluate(FormulaId::SlurryAccelEnergy, &energy_params(0.2))
        .expect("energy not met");
    assert_eq!(record.primary, PrimaryResult::ConditionMet(false));
}

#[test]
fn energy_check_rejects_negative_length() {
    let params = energy_params(0.1).with("L", -5.0);
    match engine::evaluate(FormulaId::SlurryAccelEnergy, &params) {
        Err(CalcError::Domain(msg)) => assert_eq!(msg, "管道长度 L 不能为负"),
        other => panic!("expected domain error, got {other:?}"),
    }
}
