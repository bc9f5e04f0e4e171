use crate::engine::{CalcError, CalcRecord, FormulaId, ParamSet, PrimaryResult, Term};
use crate::numeric::safe_round;

/// 当量粗糙度默认值 [m]。
const ROUGHNESS_DEFAULT: f64 = 0.0002;
/// 层流与湍流的雷诺数分界。
const LAMINAR_RE_MAX: f64 = 2300.0;
/// 相对粗糙度下限，避免 log10 取到零附近。
const EPS_D_FLOOR: f64 = 1e-10;

const RE_MESSAGE: &str = "达西摩阻系数公式需要参数：Re（雷诺数）且 Re > 0";
const DIAMETER_MESSAGE: &str = "湍流时需提供管道内径 D";

/// 达西摩阻系数，无量纲。
///
/// 层流（Re < 2300）取 λ = 64/Re；湍流用 Swamee-Jain 近似
/// λ = 0.25 / [log10(ε/(3.7·D) + 5.74/Re^0.9)]²，此时必须提供管径 D。
pub fn friction_factor(params: &ParamSet) -> Result<CalcRecord, CalcError> {
    let re = match params.get("Re") {
        None => return Err(CalcError::MissingParameter(RE_MESSAGE.to_string())),
        Some(v) if v <= 0.0 => return Err(CalcError::Domain(RE_MESSAGE.to_string())),
        Some(v) => v,
    };
    let epsilon = params.resolve("epsilon", ROUGHNESS_DEFAULT).value;

    if re < LAMINAR_RE_MAX {
        let lam = 64.0 / re;
        return Ok(CalcRecord {
            formula: FormulaId::DarcyFriction,
            primary: PrimaryResult::FrictionFactor(safe_round(lam, 6)?),
            unit: "",
            intermediate: vec![
                Term::number("Re", safe_round(re, 4)?),
                Term::text("flow_regime", "层流"),
            ],
        });
    }

    let d = match params.get("D") {
        None => return Err(CalcError::MissingParameter(DIAMETER_MESSAGE.to_string())),
        Some(v) if v <= 0.0 => return Err(CalcError::Domain(DIAMETER_MESSAGE.to_string())),
        Some(v) => v,
    };
    let eps_d = (epsilon / d).max(EPS_D_FLOOR);
    let term = eps_d / 3.7 + 5.74 / re.powf(0.9);
    if term <= 0.0 {
        return Err(CalcError::Domain("达西摩阻系数计算项无效".to_string()));
    }
    let lam = 0.25 / term.log10().powi(2);

    Ok(CalcRecord {
        formula: FormulaId::DarcyFriction,
        primary: PrimaryResult::FrictionFactor(safe_round(lam, 6)?),
        unit: "",
        intermediate: vec![
            Term::number("Re", safe_round(re, 4)?),
            Term::number("eps_D", safe_round(eps_d, 6)?),
            Term::text("flow_regime", "湍流"),
        ],
    })
}
