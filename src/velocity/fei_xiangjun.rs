use crate::engine::{CalcError, CalcRecord, FormulaId, ParamSet, PrimaryResult, Term};
use crate::numeric::{checked_powf, safe_round};

/// 经验系数默认值。
const COEFFICIENT_DEFAULT: f64 = 2.26;

const REQUIRED_MESSAGE: &str = "费祥俊公式需要所有参数：D, rho_g, rho_k, Cv, omega, d90, lambda_coef";

/// 费祥俊公式计算非均质矿浆的临界流速 [m/s]。
///
/// Vc = (2.26/√λ) · [g·D·(ρg−ρk)/ρk·ω]^(1/2) · Cv^0.25 · (d90/D)^(1/3)
///
/// lambda_coef 为管道摩阻系数，粒径修正取 d90 与管径之比。
pub fn critical_velocity(params: &ParamSet) -> Result<CalcRecord, CalcError> {
    let [d, rho_g, rho_k, cv, omega, d90, lambda_coef] = params.require(
        ["D", "rho_g", "rho_k", "Cv", "omega", "d90", "lambda_coef"],
        REQUIRED_MESSAGE,
    )?;
    let g = params.resolve_gravity().value;
    let coefficient = params.resolve("coefficient_2_26", COEFFICIENT_DEFAULT).value;

    if d == 0.0 {
        return Err(CalcError::Domain("D不能为0".to_string()));
    }
    if lambda_coef <= 0.0 {
        return Err(CalcError::Domain("lambda_coef必须大于0".to_string()));
    }
    if rho_k == 0.0 {
        return Err(CalcError::Domain("载体液体密度rho_k不能为0".to_string()));
    }
    if rho_g < rho_k {
        return Err(CalcError::Domain(
            "固体颗粒密度rho_g必须大于载体液体密度rho_k".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&cv) {
        return Err(CalcError::Domain("体积浓度Cv必须在0-1之间".to_string()));
    }
    if omega < 0.0 {
        return Err(CalcError::Domain("速度参数omega不能为负数".to_string()));
    }
    if d90 < 0.0 {
        return Err(CalcError::Domain("d90粒径不能为负数".to_string()));
    }

    let delta_rho_ratio = (rho_g - rho_k) / rho_k;
    let bracket_value = g * d * delta_rho_ratio * omega;
    if bracket_value < 0.0 {
        return Err(CalcError::Domain(format!(
            "核心项计算结果为负数: {bracket_value}，请检查输入参数（D、g、omega必须为正数，且rho_g > rho_k）"
        )));
    }
    let bracket_term = checked_powf(bracket_value, 0.5)?;
    let conc_term = checked_powf(cv, 0.25)?;
    let size_term = checked_powf(d90 / d, 1.0 / 3.0)?;
    let leading_coef = coefficient / checked_powf(lambda_coef, 0.5)?;
    let vc = leading_coef * bracket_term * conc_term * size_term;

    Ok(CalcRecord {
        formula: FormulaId::FeiXiangjun,
        primary: PrimaryResult::CriticalVelocity(Some(safe_round(vc, 6)?)),
        unit: "m/s",
        intermediate: vec![
            Term::number("delta_rho_ratio", safe_round(delta_rho_ratio, 6)?),
            Term::number("bracket_term", safe_round(bracket_term, 6)?),
            Term::number("conc_term", safe_round(conc_term, 6)?),
            Term::number("size_term", safe_round(size_term, 6)?),
            Term::number("leading_coef", safe_round(leading_coef, 6)?),
            Term::number("coefficient_2_26", safe_round(coefficient, 2)?),
            Term::number("lambda_coef", safe_round(lambda_coef, 6)?),
            Term::number("g", safe_round(g, 2)?),
        ],
    })
}
