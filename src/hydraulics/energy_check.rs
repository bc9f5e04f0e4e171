use crate::engine::{CalcError, CalcRecord, FormulaId, ParamSet, PrimaryResult, Term};
use crate::numeric::safe_round;

const REQUIRED_MESSAGE: &str = "浆体加速流及消能需要参数：Z₁、Z₂、H₁、H₂、i、L";

/// 浆体加速流及消能判别。
///
/// 判断总水头差 (Z₁+H₁) − (Z₂+H₂) 是否大于沿程摩阻损失 i·L。
/// H₁、H₂ 为断面测压水头 P/(ρk·g)，成立表示余能需消耗。
pub fn acceleration_check(params: &ParamSet) -> Result<CalcRecord, CalcError> {
    let [z1, z2, h1, h2, i, l] =
        params.require(["Z1", "Z2", "H1", "H2", "i", "L"], REQUIRED_MESSAGE)?;

    if l < 0.0 {
        return Err(CalcError::Domain("管道长度 L 不能为负".to_string()));
    }

    let head_diff = (z1 + h1) - (z2 + h2);
    let friction_loss_total = i * l;
    let condition_met = head_diff > friction_loss_total;

    Ok(CalcRecord {
        formula: FormulaId::SlurryAccelEnergy,
        primary: PrimaryResult::ConditionMet(condition_met),
        unit: "",
        intermediate: vec![
            Term::number("head_diff", safe_round(head_diff, 6)?),
            Term::number("friction_loss_total", safe_round(friction_loss_total, 6)?),
        ],
    })
}
