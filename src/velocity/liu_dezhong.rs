use crate::engine::{CalcError, CalcRecord, FormulaId, ParamSet, PrimaryResult, Term};
use crate::numeric::{checked_powf, safe_round};

/// 经验系数默认值。
const COEFFICIENT_DEFAULT: f64 = 9.5;

const REQUIRED_MESSAGE: &str = "刘德忠公式需要所有参数：D, rho_g, rho_k, omega, Cv, omega_s";

/// 刘德忠公式计算非均质矿浆的临界流速 [m/s]。
///
/// Vc = 9.5 · [g·D·(ρg−ρk)/ρk·ω]^(1/3) · Cv^(1/6) · (ωs/ω)^(1/6)
///
/// rho_g 为固体颗粒密度，rho_k 为载体液体密度，omega 为水力粗度，
/// omega_s 为颗粒沉降速度，Cv 为体积浓度。
pub fn critical_velocity(params: &ParamSet) -> Result<CalcRecord, CalcError> {
    let [d, rho_g, rho_k, omega, cv, omega_s] = params.require(
        ["D", "rho_g", "rho_k", "omega", "Cv", "omega_s"],
        REQUIRED_MESSAGE,
    )?;
    let g = params.resolve_gravity().value;
    let coefficient = params.resolve("coefficient_9_5", COEFFICIENT_DEFAULT).value;

    if omega == 0.0 {
        return Err(CalcError::Domain("omega不能为0".to_string()));
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
    if omega_s < 0.0 {
        return Err(CalcError::Domain("沉降速度omega_s不能为负数".to_string()));
    }

    let delta_rho_ratio = (rho_g - rho_k) / rho_k;
    let core_value = g * d * delta_rho_ratio * omega;
    if core_value < 0.0 {
        return Err(CalcError::Domain(format!(
            "核心项计算结果为负数: {core_value}，请检查输入参数（D、g、omega必须为正数，且rho_g > rho_k）"
        )));
    }
    let core_term = checked_powf(core_value, 1.0 / 3.0)?;
    let concentration_term = checked_powf(cv, 1.0 / 6.0)?;
    let velocity_ratio_term = checked_powf(omega_s / omega, 1.0 / 6.0)?;
    let vc = coefficient * core_term * concentration_term * velocity_ratio_term;

    Ok(CalcRecord {
        formula: FormulaId::LiuDezhong,
        primary: PrimaryResult::CriticalVelocity(Some(safe_round(vc, 6)?)),
        unit: "m/s",
        intermediate: vec![
            Term::number("delta_rho_ratio", safe_round(delta_rho_ratio, 6)?),
            Term::number("core_term", safe_round(core_term, 6)?),
            Term::number("concentration_term", safe_round(concentration_term, 6)?),
            Term::number("velocity_ratio_term", safe_round(velocity_ratio_term, 6)?),
            Term::number("coefficient", safe_round(coefficient, 2)?),
            Term::number("g", safe_round(g, 2)?),
        ],
    })
}
