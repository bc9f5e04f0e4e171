use crate::engine::{CalcError, CalcRecord, FormulaId, ParamSet, PrimaryResult, Term};
use crate::numeric::{bisect, checked_powf, safe_round};

/// 波动系数默认值。
const FLUCTUATION_DEFAULT: f64 = 1.1;
/// 固体物料相对密度修正系数默认值。
const BETA_DEFAULT: f64 = 1.0;
/// 细粒径方程适用上限 [mm]。
const FINE_PARTICLE_MAX_MM: f64 = 0.07;
/// 公式整体适用粒径上限 [mm]。
const PARTICLE_MAX_MM: f64 = 0.15;
/// DL 求根区间下限 [mm]。
const DL_BRACKET_LO_MM: f64 = 1e-6;
/// DL 求根区间上限 [mm]。
const DL_BRACKET_HI_MM: f64 = 5000.0;
const DL_TOLERANCE: f64 = 1e-6;
const DL_MAX_ITER: u32 = 200;

const REQUIRED_MESSAGE: &str = "步骤1 需要参数：G（干尾矿重量）、W（矿浆中水重）、ρg（尾矿相对密度）";

/// B.C.克诺罗兹法压力输送临界流速，三步计算，每步可独立完成：
///
/// A) 矿浆流量 Qk = K·W·(1/ρg + G/W)，仅需 K、G、W、ρg，不需 dp；
/// B) 临界管径 DL，由 Qk 按粒径分段的通过能力方程反解，
///    dp ≤ 0.07mm 与 0.07 < dp ≤ 0.15mm 各用一套方程；
/// C) 临界流速 V_L = 0.255·β·(1 + 2.48·Cd^(1/3)·DL^(1/4))，Cd = G/W·100。
///
/// 未提供有效 dp 时只返回步骤 A 的结果，dp 超过 0.15mm 属输入错误。
pub fn critical_velocity(params: &ParamSet) -> Result<CalcRecord, CalcError> {
    let [g_dry, w_water, rho_g] = params.require(["G", "W", "rho_g"], REQUIRED_MESSAGE)?;
    let k = params.resolve("K", FLUCTUATION_DEFAULT).value;
    let beta = params.resolve("beta", BETA_DEFAULT).value;

    if w_water == 0.0 {
        return Err(CalcError::Domain("矿浆中水重 W 不能为0".to_string()));
    }
    if rho_g <= 0.0 {
        return Err(CalcError::Domain("尾矿相对密度 ρg 必须大于0".to_string()));
    }

    let qk = k * w_water * (1.0 / rho_g + g_dry / w_water);
    if qk <= 0.0 {
        return Err(CalcError::Domain(
            "矿浆流量 Qk 计算结果应大于0，请检查 G、W、ρg".to_string(),
        ));
    }
    // 重量砂水比（砂重/水重×100）
    let cd = (g_dry / w_water) * 100.0;

    // 未填写 dp 或 dp 无效时，步骤 A 独立返回
    let dp = match params.get("dp") {
        Some(v) if v > 0.0 => v,
        _ => {
            return Ok(CalcRecord {
                formula: FormulaId::KronodzePressure,
                primary: PrimaryResult::CriticalVelocity(None),
                unit: "m/s",
                intermediate: vec![
                    Term::number("step_A_Qk", safe_round(qk, 6)?),
                    Term::number("Cd", safe_round(cd, 6)?),
                ],
            });
        }
    };
    if dp > PARTICLE_MAX_MM {
        return Err(CalcError::Domain(format!(
            "尾矿加权平均粒径 dp 应 ≤0.15mm，当前为 {dp:.3} mm"
        )));
    }

    let dl = if dp <= FINE_PARTICLE_MAX_MM {
        bisect(
            |dl| dl_equation_fine(dl, qk, cd, beta),
            DL_BRACKET_LO_MM,
            DL_BRACKET_HI_MM,
            DL_TOLERANCE,
            DL_MAX_ITER,
        )
    } else {
        bisect(
            |dl| dl_equation_medium(dl, qk, cd, beta),
            DL_BRACKET_LO_MM,
            DL_BRACKET_HI_MM,
            DL_TOLERANCE,
            DL_MAX_ITER,
        )
    };
    let dl = match dl {
        Some(v) if v > 0.0 => v,
        _ => {
            return Err(CalcError::Unsolvable(
                "无法求解临界管径 DL，请检查输入参数是否合理".to_string(),
            ));
        }
    };

    if cd <= 0.0 {
        return Err(CalcError::Domain("重量砂水比 Cd 应大于0".to_string()));
    }
    let term_cd = checked_powf(cd, 1.0 / 3.0)?;
    let term_dl = checked_powf(dl, 0.25)?;
    let vc = 0.255 * beta * (1.0 + 2.48 * term_cd * term_dl);

    Ok(CalcRecord {
        formula: FormulaId::KronodzePressure,
        primary: PrimaryResult::CriticalVelocity(Some(safe_round(vc, 6)?)),
        unit: "m/s",
        intermediate: vec![
            Term::number("step_A_Qk", safe_round(qk, 6)?),
            Term::number("step_B_DL_mm", safe_round(dl, 4)?),
            Term::number("Cd", safe_round(cd, 6)?),
            Term::number("step_C_V_L", safe_round(vc, 6)?),
        ],
    })
}

/// dp ≤ 0.07mm 段的管径方程，根处管道通过能力与 Qk 持平。
fn dl_equation_fine(dl: f64, qk: f64, cd: f64, beta: f64) -> f64 {
    if dl <= 0.0 {
        return -qk;
    }
    let inner = cd * dl.powf(0.15);
    if inner <= 0.0 {
        return -qk;
    }
    0.157 * beta * dl * (1.0 + 3.434 * inner.powf(0.25)) - qk
}

/// 0.07 < dp ≤ 0.15mm 段的管径方程。
fn dl_equation_medium(dl: f64, qk: f64, cd: f64, beta: f64) -> f64 {
    if dl <= 0.0 {
        return -qk;
    }
    let inner = cd * dl.powf(0.25);
    if inner <= 0.0 {
        return -qk;
    }
    0.2 * beta * dl * (1.0 + 2.48 * inner.powf(1.0 / 3.0)) - qk
}
