use crate::engine::{CalcError, CalcRecord, FormulaId, ParamSet, PrimaryResult, Term};
use crate::numeric::safe_round;

const REQUIRED_MESSAGE: &str = "沿程摩阻损失需要参数：λ、V、ρ_k、D、ρ_s";

/// 沿程摩阻损失 [mH₂O/m]。
///
/// i_k = λ · V²·ρk / (2·g·D·ρs)
///
/// rho_k 为矿浆密度，rho_s 为清水密度，两者同单位时结果即水柱坡降。
pub fn head_loss(params: &ParamSet) -> Result<CalcRecord, CalcError> {
    let [lambda_coef, v, rho_k, d, rho_s] =
        params.require(["lambda_coef", "V", "rho_k", "D", "rho_s"], REQUIRED_MESSAGE)?;
    let g = params.resolve_gravity().value;

    if d == 0.0 || rho_s == 0.0 || g == 0.0 {
        return Err(CalcError::Domain("D、ρ_s、g 不能为0".to_string()));
    }

    let numerator = v * v * rho_k;
    let denominator = 2.0 * g * d * rho_s;
    let i_k = lambda_coef * numerator / denominator;
    if i_k < 0.0 {
        return Err(CalcError::Domain(
            "沿程摩阻损失计算结果为负，请检查输入".to_string(),
        ));
    }

    Ok(CalcRecord {
        formula: FormulaId::FrictionLoss,
        primary: PrimaryResult::HeadLoss(safe_round(i_k, 6)?),
        unit: "mH₂O/m",
        intermediate: vec![
            Term::number("numerator", safe_round(numerator, 6)?),
            Term::number("denominator", safe_round(denominator, 6)?),
        ],
    })
}
