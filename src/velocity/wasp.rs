use crate::engine::{CalcError, CalcRecord, FormulaId, ParamSet, PrimaryResult, Term};
use crate::numeric::{checked_powf, safe_round};

/// 经验系数默认值。
const COEFFICIENT_DEFAULT: f64 = 3.113;

const REQUIRED_MESSAGE: &str = "E.J.瓦斯普公式需要所有参数：D, rho_g, rho_k, Cv, d85";

/// E.J.瓦斯普公式计算非均质矿浆的临界流速 [m/s]。
///
/// Vc = 3.113 · Cv^0.1858 · [2·g·D·(ρg−ρk)/ρk]^(1/2) · (d85/D)^(1/6)
///
/// 括号项不含沉降速度，粒径修正取 d85 与管径之比。
pub fn critical_velocity(params: &ParamSet) -> Result<CalcRecord, CalcError> {
    let [d, rho_g, rho_k, cv, d85] =
        params.require(["D", "rho_g", "rho_k", "Cv", "d85"], REQUIRED_MESSAGE)?;
    let g = params.resolve_gravity().value;
    let coefficient = params.resolve("coefficient_3_113", COEFFICIENT_DEFAULT).value;

    if d == 0.0 {
        return Err(CalcError::Domain("D不能为0".to_string()));
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
    if d85 < 0.0 {
        return Err(CalcError::Domain("d85粒径不能为负数".to_string()));
    }

    let delta_rho_ratio = (rho_g - rho_k) / rho_k;
    let bracket_value = 2.0 * g * d * delta_rho_ratio;
    if bracket_value < 0.0 {
        return Err(CalcError::Domain(format!(
            "核心项计算结果为负数: {bracket_value}，请检查输入参数（D、g必须为正数，且rho_g > rho_k）"
        )));
    }
    let bracket_term = checked_powf(bracket_value, 0.5)?;
    let concentration_term = checked_powf(cv, 0.1858)?;
    let size_ratio_term = checked_powf(d85 / d, 1.0 / 6.0)?;
    let vc = coefficient * concentration_term * bracket_term * size_ratio_term;

    Ok(CalcRecord {
        formula: FormulaId::Wasp,
        primary: PrimaryResult::CriticalVelocity(Some(safe_round(vc, 6)?)),
        unit: "m/s",
        intermediate: vec![
            Term::number("delta_rho_ratio", safe_round(delta_rho_ratio, 6)?),
            Term::number("bracket_term", safe_round(bracket_term, 6)?),
            Term::number("concentration_term", safe_round(concentration_term, 6)?),
            Term::number("size_ratio_term", safe_round(size_ratio_term, 6)?),
            Term::number("coefficient", safe_round(coefficient, 3)?),
            Term::number("g", safe_round(g, 2)?),
        ],
    })
}
