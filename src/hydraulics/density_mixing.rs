use crate::engine::{CalcError, CalcRecord, FormulaId, ParamSet, PrimaryResult, Term};
use crate::numeric::safe_round;

const REQUIRED_MESSAGE: &str = "密度混合公式需要参数：C_w、ρ_g、ρ_s";

/// 浆体密度混合公式 [t/m³]。
///
/// ρk = 1 / (C_w/ρg + (1−C_w)/ρs)
///
/// C_w 为固相质量浓度，rho_g 为固体颗粒密度，rho_s 为载体清水密度。
/// C_w = 0 时退化为清水密度，C_w = 1 时退化为固体密度。
pub fn slurry_density(params: &ParamSet) -> Result<CalcRecord, CalcError> {
    let [c_w, rho_g, rho_s] = params.require(["C_w", "rho_g", "rho_s"], REQUIRED_MESSAGE)?;

    if rho_g == 0.0 || rho_s == 0.0 {
        return Err(CalcError::Domain("ρ_g、ρ_s 不能为0".to_string()));
    }
    if !(0.0..=1.0).contains(&c_w) {
        return Err(CalcError::Domain("质量浓度 C_w 应在 0～1 之间".to_string()));
    }

    let denom = c_w / rho_g + (1.0 - c_w) / rho_s;
    if denom <= 0.0 {
        return Err(CalcError::Domain("密度混合公式分母应大于0".to_string()));
    }
    let rho_k = 1.0 / denom;

    Ok(CalcRecord {
        formula: FormulaId::DensityMixing,
        primary: PrimaryResult::SlurryDensity(safe_round(rho_k, 6)?),
        unit: "t/m³",
        intermediate: vec![Term::number("denom", safe_round(denom, 6)?)],
    })
}
