use std::str::FromStr;

use crate::hydraulics;
use crate::velocity;

/// 重力加速度默认值 [m/s²]。未显式给 g 时各公式统一采用。
pub const GRAVITY_DEFAULT: f64 = 9.81;

/// 计算引擎支持的公式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormulaId {
    /// 刘德忠公式，临界流速
    LiuDezhong,
    /// E.J.瓦斯普公式，临界流速
    Wasp,
    /// 费祥俊公式，临界流速
    FeiXiangjun,
    /// 克诺罗兹压力输送公式，三步法临界流速
    KronodzePressure,
    /// 沿程摩阻损失
    FrictionLoss,
    /// 浆体密度混合公式
    DensityMixing,
    /// 达西摩阻系数
    DarcyFriction,
    /// 浆体加速流及消能判别
    SlurryAccelEnergy,
}

impl FormulaId {
    /// 全部公式，按目录展示顺序排列。
    pub const ALL: [FormulaId; 8] = [
        FormulaId::LiuDezhong,
        FormulaId::Wasp,
        FormulaId::FeiXiangjun,
        FormulaId::KronodzePressure,
        FormulaId::FrictionLoss,
        FormulaId::DensityMixing,
        FormulaId::DarcyFriction,
        FormulaId::SlurryAccelEnergy,
    ];

    /// 对外暴露的公式 ID 字符串。
    pub fn as_str(&self) -> &'static str {
        match self {
            FormulaId::LiuDezhong => "liu_dezhong",
            FormulaId::Wasp => "wasp",
            FormulaId::FeiXiangjun => "fei_xiangjun",
            FormulaId::KronodzePressure => "kronodze_pressure",
            FormulaId::FrictionLoss => "friction_loss",
            FormulaId::DensityMixing => "density_mixing",
            FormulaId::DarcyFriction => "darcy_friction",
            FormulaId::SlurryAccelEnergy => "slurry_accel_energy",
        }
    }
}

impl FromStr for FormulaId {
    type Err = CalcError;

    fn from_str(id: &str) -> Result<Self, CalcError> {
        match id {
            "liu_dezhong" => Ok(FormulaId::LiuDezhong),
            "wasp" => Ok(FormulaId::Wasp),
            "fei_xiangjun" => Ok(FormulaId::FeiXiangjun),
            "kronodze_pressure" => Ok(FormulaId::KronodzePressure),
            "friction_loss" => Ok(FormulaId::FrictionLoss),
            "density_mixing" => Ok(FormulaId::DensityMixing),
            "darcy_friction" => Ok(FormulaId::DarcyFriction),
            "slurry_accel_energy" => Ok(FormulaId::SlurryAccelEnergy),
            _ => Err(CalcError::UnknownFormula(id.to_string())),
        }
    }
}

/// 参数取值的来源。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// 调用方显式提供
    Explicit,
    /// 公式级默认值
    FormulaDefault,
    /// 全局默认值
    GlobalDefault,
}

/// 解析后的可选参数，记录实际取值和来源。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    pub value: f64,
    pub source: ValueSource,
}

/// 以名称索引的输入参数集合。保持插入顺序，报告按此顺序列出参数。
#[derive(Debug, Clone, Default)]
pub struct ParamSet {
    entries: Vec<(String, f64)>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置参数值，同名参数覆盖旧值。
    pub fn set(&mut self, key: &str, value: f64) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key.to_string(), value));
        }
    }

    /// 链式设置，便于一次性构造参数集。
    pub fn with(mut self, key: &str, value: f64) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    /// 解析可选参数：显式值优先，否则落到公式级默认值。
    pub fn resolve(&self, key: &str, formula_default: f64) -> Resolved {
        match self.get(key) {
            Some(value) => Resolved {
                value,
                source: ValueSource::Explicit,
            },
            None => Resolved {
                value: formula_default,
                source: ValueSource::FormulaDefault,
            },
        }
    }

    /// 解析重力加速度：显式值优先，否则落到全局默认 9.81。
    pub fn resolve_gravity(&self) -> Resolved {
        match self.get("g") {
            Some(value) => Resolved {
                value,
                source: ValueSource::Explicit,
            },
            None => Resolved {
                value: GRAVITY_DEFAULT,
                source: ValueSource::GlobalDefault,
            },
        }
    }

    /// 一次取出全部必需参数。任一缺失即以 message 报缺参错误，
    /// 不逐个报告。
    pub fn require<const N: usize>(
        &self,
        keys: [&str; N],
        message: &str,
    ) -> Result<[f64; N], CalcError> {
        let mut values = [0.0; N];
        for (slot, key) in values.iter_mut().zip(keys) {
            match self.get(key) {
                Some(v) => *slot = v,
                None => return Err(CalcError::MissingParameter(message.to_string())),
            }
        }
        Ok(values)
    }

    /// 按插入顺序遍历参数。
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 中间计算量的取值形态。
#[derive(Debug, Clone, PartialEq)]
pub enum TermValue {
    /// 数值量，已按各公式约定的小数位舍入
    Number(f64),
    /// 文字量，如流态判别结果
    Text(&'static str),
}

/// 一个中间计算量。
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub key: &'static str,
    pub value: TermValue,
}

impl Term {
    pub fn number(key: &'static str, value: f64) -> Self {
        Self {
            key,
            value: TermValue::Number(value),
        }
    }

    pub fn text(key: &'static str, value: &'static str) -> Self {
        Self {
            key,
            value: TermValue::Text(value),
        }
    }
}

/// 最终结果，按公式族区分取值形态。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimaryResult {
    /// 临界流速 Vc。克诺罗兹公式缺 dp 时仅完成流量步，此处为 None。
    CriticalVelocity(Option<f64>),
    /// 沿程摩阻损失 i_k
    HeadLoss(f64),
    /// 矿浆密度 rho_k
    SlurryDensity(f64),
    /// 达西摩阻系数 lambda
    FrictionFactor(f64),
    /// 消能判别结果
    ConditionMet(bool),
}

impl PrimaryResult {
    /// 最终结果的对外字段名。
    pub fn key(&self) -> &'static str {
        match self {
            PrimaryResult::CriticalVelocity(_) => "Vc",
            PrimaryResult::HeadLoss(_) => "i_k",
            PrimaryResult::SlurryDensity(_) => "rho_k",
            PrimaryResult::FrictionFactor(_) => "lambda_coef",
            PrimaryResult::ConditionMet(_) => "condition_met",
        }
    }

    /// 数值型结果。结果缺失或为判别式时返回 None。
    pub fn number(&self) -> Option<f64> {
        match self {
            PrimaryResult::CriticalVelocity(v) => *v,
            PrimaryResult::HeadLoss(v)
            | PrimaryResult::SlurryDensity(v)
            | PrimaryResult::FrictionFactor(v) => Some(*v),
            PrimaryResult::ConditionMet(_) => None,
        }
    }
}

/// 一次计算的完整记录。
#[derive(Debug, Clone)]
pub struct CalcRecord {
    pub formula: FormulaId,
    /// 最终结果
    pub primary: PrimaryResult,
    /// 最终结果单位，无量纲时为空串
    pub unit: &'static str,
    /// 中间计算量，按计算顺序排列
    pub intermediate: Vec<Term>,
}

impl CalcRecord {
    /// 按 key 查找中间量的数值。
    pub fn intermediate_number(&self, key: &str) -> Option<f64> {
        self.intermediate.iter().find_map(|term| match term {
            Term {
                key: k,
                value: TermValue::Number(v),
            } if *k == key => Some(*v),
            _ => None,
        })
    }
}

/// 计算过程中可能出现的错误。
#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    /// 未注册的公式 ID
    UnknownFormula(String),
    /// 缺少必需参数
    MissingParameter(String),
    /// 输入超出公式适用范围
    Domain(String),
    /// 结果出现不可忽略的虚部
    ComplexResult(String),
    /// 结果为 NaN 或无穷
    InvalidResult(String),
    /// 数值求根失败
    Unsolvable(String),
}

impl std::fmt::Display for CalcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalcError::UnknownFormula(id) => write!(f, "未知的公式ID: {id}"),
            CalcError::MissingParameter(msg)
            | CalcError::Domain(msg)
            | CalcError::ComplexResult(msg)
            | CalcError::InvalidResult(msg)
            | CalcError::Unsolvable(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CalcError {}

/// 按公式 ID 字符串调度计算。
pub fn calculate(formula_id: &str, params: &ParamSet) -> Result<CalcRecord, CalcError> {
    let formula = FormulaId::from_str(formula_id)?;
    evaluate(formula, params)
}

/// 调度已解析的公式。
pub fn evaluate(formula: FormulaId, params: &ParamSet) -> Result<CalcRecord, CalcError> {
    match formula {
        FormulaId::LiuDezhong => velocity::liu_dezhong::critical_velocity(params),
        FormulaId::Wasp => velocity::wasp::critical_velocity(params),
        FormulaId::FeiXiangjun => velocity::fei_xiangjun::critical_velocity(params),
        FormulaId::KronodzePressure => velocity::kronodze::critical_velocity(params),
        FormulaId::FrictionLoss => hydraulics::friction_loss::head_loss(params),
        FormulaId::DensityMixing => hydraulics::density_mixing::slurry_density(params),
        FormulaId::DarcyFriction => hydraulics::darcy_friction::friction_factor(params),
        FormulaId::SlurryAccelEnergy => hydraulics::energy_check::acceleration_check(params),
    }
}
