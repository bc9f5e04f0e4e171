use crate::engine::FormulaId;

/// 单个输入参数的描述。
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub key: &'static str,
    /// 界面显示名
    pub label: &'static str,
    pub unit: &'static str,
    pub description: &'static str,
    /// 留空时引擎采用的默认值
    pub default: Option<f64>,
    /// 无默认值但允许留空的参数，如克诺罗兹法的 dp
    pub optional: bool,
}

impl ParamSpec {
    /// 录入时允许留空。
    pub fn skippable(&self) -> bool {
        self.optional || self.default.is_some()
    }
}

/// 公式描述。目录只是数据，引擎本身不依赖它。
#[derive(Debug, Clone, Copy)]
pub struct FormulaSpec {
    pub id: FormulaId,
    pub name: &'static str,
    pub formula: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
}

impl FormulaSpec {
    /// 必填参数的 key 集合，与引擎 require 列表一致。
    pub fn required_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.params
            .iter()
            .filter(|p| !p.skippable())
            .map(|p| p.key)
    }
}

/// 公式分组，按流态划分。
#[derive(Debug, Clone, Copy)]
pub struct FormulaGroup {
    pub name: &'static str,
    pub formulas: &'static [FormulaSpec],
}

const GRAVITY_PARAM: ParamSpec = ParamSpec {
    key: "g",
    label: "重力加速度",
    unit: "m/s²",
    description: "重力加速度，默认值9.81，单位：米每秒平方（m/s²）",
    default: Some(9.81),
    optional: false,
};

const LIU_DEZHONG: FormulaSpec = FormulaSpec {
    id: FormulaId::LiuDezhong,
    name: "刘德忠公式",
    formula: "Vc = 9.5 * [g*D*(Δρ/ρ)*ω]^(1/3) * Cv^(1/6) * (ω_s/ω)^(1/6)",
    description: "本模型由刘德忠教授提出，是中国浆体管道设计中的主流经验公式之一。\
其核心思想基于浆体的整体沉降特性，通过引入加权平均沉速（ω）与静态界面沉速（ωs）\
这两个关键实验参数，来综合反映固体颗粒群的干涉沉降行为。该公式尤其适用于细颗粒\
（如d<2mm）含量较高、级配相对均匀的浆体，计算结果与中国工程实践贴合紧密。\
使用本公式的前提是需通过静态沉降柱试验获取可靠的ω与ωs值。",
    params: &[
        ParamSpec {
            key: "D",
            label: "管道内径",
            unit: "m",
            description: "管道内径，单位：米（m）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "rho_g",
            label: "固体颗粒密度",
            unit: "kg/m³",
            description: "固体颗粒密度，单位：千克每立方米（kg/m³）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "rho_k",
            label: "载体液体密度",
            unit: "kg/m³",
            description: "载体液体密度，单位：千克每立方米（kg/m³）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "omega",
            label: "速度参数",
            unit: "m/s",
            description: "加权平均沉速ω，单位：米每秒（m/s）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "Cv",
            label: "体积浓度",
            unit: "decimal",
            description: "体积浓度Cv，单位：小数（decimal）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "omega_s",
            label: "沉降速度",
            unit: "m/s",
            description: "静态界面沉速ω_s，单位：米每秒（m/s）",
            default: None,
            optional: false,
        },
        GRAVITY_PARAM,
        ParamSpec {
            key: "coefficient_9_5",
            label: "经验系数",
            unit: "",
            description: "经验系数，默认值9.5",
            default: Some(9.5),
            optional: false,
        },
    ],
};

const WASP: FormulaSpec = FormulaSpec {
    id: FormulaId::Wasp,
    name: "E.J.瓦斯普公式",
    formula: "Vc = 3.113 * Cv^0.1858 * [2*g*D*(Δρ/ρ)]^(1/2) * (d85/D)^(1/6)",
    description: "本模型由E.J.Wasp等人提出，是国际上分析宽级配、非均质流临界流速的\
经典理论公式。其理论基础为两相流扩散模型，公式结构清晰体现了悬浮能量消耗与颗粒沉降\
间的平衡。它通过体积浓度（Cv）和相对密度差（Δρ/ρ）来表征输送难度，并首次引入特征\
粒径（d85）来量化粗颗粒对床层形成的影响。该公式特别适合粒径分布范围广、存在显著\
非均质输送特性的浆体。",
    params: &[
        ParamSpec {
            key: "D",
            label: "管道内径",
            unit: "m",
            description: "管道内径，单位：米（m）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "rho_g",
            label: "固体颗粒密度",
            unit: "kg/m³",
            description: "固体颗粒密度，单位：千克每立方米（kg/m³）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "rho_k",
            label: "载体液体密度",
            unit: "kg/m³",
            description: "载体液体密度，单位：千克每立方米（kg/m³）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "Cv",
            label: "体积浓度",
            unit: "decimal",
            description: "体积浓度Cv，单位：小数（decimal）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "d85",
            label: "d85粒径",
            unit: "m",
            description: "d85特征粒径，单位：米（m）",
            default: None,
            optional: false,
        },
        GRAVITY_PARAM,
        ParamSpec {
            key: "coefficient_3_113",
            label: "经验系数",
            unit: "",
            description: "经验系数，默认值3.113",
            default: Some(3.113),
            optional: false,
        },
    ],
};

const FEI_XIANGJUN: FormulaSpec = FormulaSpec {
    id: FormulaId::FeiXiangjun,
    name: "费祥俊公式",
    formula: "Vc = (2.26/√λ) * [gD*(Δρ/ρ)*ω]^(1/2) * Cv^0.25 * (d90/D)^(1/3)",
    description: "本模型由费祥俊教授建立，其显著特点是首次将管道沿程阻力系数（λ）引入\
临界流速的计算，在理论上将输送能耗与维持颗粒悬浮的能耗进行了统一。公式采用特征粒径\
（d90）来表征浆体颗粒群的粗细程度，并对浆体浓度（Cv）影响的刻画较为显著。该公式在\
理论上更为全面，尤其适合于长距离输送管道的水力坡降与系统设计。应用时，需根据管道材质、\
内壁状况及流态等条件合理确定或计算沿程阻力系数（λ），此参数对计算结果有重要影响。",
    params: &[
        ParamSpec {
            key: "D",
            label: "管道内径",
            unit: "m",
            description: "管道内径，单位：米（m）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "rho_g",
            label: "固体颗粒密度",
            unit: "kg/m³",
            description: "固体颗粒密度，单位：千克每立方米（kg/m³）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "rho_k",
            label: "载体液体密度",
            unit: "kg/m³",
            description: "载体液体密度，单位：千克每立方米（kg/m³）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "Cv",
            label: "体积浓度",
            unit: "decimal",
            description: "体积浓度Cv，单位：小数（decimal）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "omega",
            label: "速度参数",
            unit: "m/s",
            description: "加权平均沉速omega，单位：米每秒（m/s）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "d90",
            label: "d90粒径",
            unit: "m",
            description: "d90特征粒径，单位：米（m）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "lambda_coef",
            label: "λ系数",
            unit: "",
            description: "摩擦阻力系数lambda，无量纲",
            default: None,
            optional: false,
        },
        GRAVITY_PARAM,
        ParamSpec {
            key: "coefficient_2_26",
            label: "经验系数",
            unit: "",
            description: "经验系数，默认值2.26",
            default: Some(2.26),
            optional: false,
        },
    ],
};

const KRONODZE_PRESSURE: FormulaSpec = FormulaSpec {
    id: FormulaId::KronodzePressure,
    name: "B.C.克诺罗兹法（压力流）",
    formula: "Qk = K*W*(1/ρg + G/W)；V_L = 0.255*β*(1 + 2.48*Cd^(1/3)*DL^(1/4))",
    description: "B.C.克诺罗兹法按三步完成压力输送管道的临界参数计算：先由波动系数（K）、\
干尾矿重量（G）与矿浆中水重（W）求矿浆流量（Qk），再按尾矿加权平均粒径（dp）分段反解\
临界管径（DL），最后由重量砂水比（Cd）与 DL 求临界流速。该方法适用于 dp 不超过 0.15mm \
的尾矿浆压力输送，未提供 dp 时单独完成流量步计算。",
    params: &[
        ParamSpec {
            key: "K",
            label: "波动系数",
            unit: "",
            description: "矿浆量波动系数，默认值1.1",
            default: Some(1.1),
            optional: false,
        },
        ParamSpec {
            key: "G",
            label: "干尾矿重量",
            unit: "t/h",
            description: "单位时间干尾矿重量，单位：吨每小时（t/h）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "W",
            label: "矿浆中水重",
            unit: "t/h",
            description: "单位时间矿浆中水重，单位：吨每小时（t/h）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "rho_g",
            label: "尾矿相对密度",
            unit: "t/m³",
            description: "尾矿相对密度，单位：吨每立方米（t/m³）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "dp",
            label: "尾矿加权平均粒径",
            unit: "mm",
            description: "尾矿加权平均粒径，应不超过0.15mm；留空时仅计算矿浆流量",
            default: None,
            optional: true,
        },
        ParamSpec {
            key: "beta",
            label: "相对密度修正系数",
            unit: "",
            description: "固体物料相对密度修正系数，默认值1.0",
            default: Some(1.0),
            optional: false,
        },
    ],
};

const FRICTION_LOSS: FormulaSpec = FormulaSpec {
    id: FormulaId::FrictionLoss,
    name: "沿程摩阻损失",
    formula: "i_k = λ*(V²*ρ_k)/(2*g*D*ρ_s)",
    description: "按达西公式形式计算浆体管道单位长度的沿程摩阻损失，以水柱高度表示。\
矿浆密度（ρ_k）与清水密度（ρ_s）之比反映浆体自重对坡降的放大作用，沿程阻力系数（λ）\
可由达西摩阻系数公式估算。",
    params: &[
        ParamSpec {
            key: "lambda_coef",
            label: "沿程阻力系数",
            unit: "",
            description: "沿程阻力系数λ，无量纲",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "V",
            label: "管内流速",
            unit: "m/s",
            description: "管内平均流速，单位：米每秒（m/s）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "rho_k",
            label: "矿浆密度",
            unit: "t/m³",
            description: "矿浆密度，单位：吨每立方米（t/m³）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "D",
            label: "管道内径",
            unit: "m",
            description: "管道内径，单位：米（m）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "rho_s",
            label: "清水密度",
            unit: "t/m³",
            description: "清水密度，单位：吨每立方米（t/m³）",
            default: None,
            optional: false,
        },
        GRAVITY_PARAM,
    ],
};

const DENSITY_MIXING: FormulaSpec = FormulaSpec {
    id: FormulaId::DensityMixing,
    name: "密度混合公式",
    formula: "ρ_k = 1/(C_w/ρ_g + (1-C_w)/ρ_s)",
    description: "由固相质量浓度（C_w）及固、液两相密度计算矿浆密度。C_w 取 0 时退化为\
清水密度，取 1 时退化为固体密度，常用于由称重配比反求浆体密度。",
    params: &[
        ParamSpec {
            key: "C_w",
            label: "质量浓度",
            unit: "decimal",
            description: "固相质量浓度C_w，单位：小数（decimal）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "rho_g",
            label: "固体颗粒密度",
            unit: "t/m³",
            description: "固体颗粒密度，单位：吨每立方米（t/m³）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "rho_s",
            label: "清水密度",
            unit: "t/m³",
            description: "载体清水密度，单位：吨每立方米（t/m³）",
            default: None,
            optional: false,
        },
    ],
};

const DARCY_FRICTION: FormulaSpec = FormulaSpec {
    id: FormulaId::DarcyFriction,
    name: "达西摩阻系数",
    formula: "层流 λ = 64/Re；湍流 λ = 0.25/[log10(ε/(3.7*D) + 5.74/Re^0.9)]²",
    description: "按雷诺数（Re）判别流态并计算达西摩阻系数：层流取 64/Re，湍流采用 \
Swamee-Jain 近似式，需提供管道内径（D）与当量粗糙度（ε）。",
    params: &[
        ParamSpec {
            key: "Re",
            label: "雷诺数",
            unit: "",
            description: "雷诺数Re，无量纲，必须大于0",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "epsilon",
            label: "当量粗糙度",
            unit: "m",
            description: "管壁当量粗糙度，默认值0.0002，单位：米（m）",
            default: Some(0.0002),
            optional: false,
        },
        ParamSpec {
            key: "D",
            label: "管道内径",
            unit: "m",
            description: "管道内径，湍流时必填，单位：米（m）",
            default: None,
            optional: true,
        },
    ],
};

const SLURRY_ACCEL_ENERGY: FormulaSpec = FormulaSpec {
    id: FormulaId::SlurryAccelEnergy,
    name: "浆体加速流及消能",
    formula: "(Z1+H1) - (Z2+H2) > i*L",
    description: "校核浆体加速流条件：比较两断面总水头差与沿程摩阻损失 iL，总水头差大于\
摩阻损失时管内为加速流，余能需设置消能设施消耗。",
    params: &[
        ParamSpec {
            key: "Z1",
            label: "起点高程",
            unit: "m",
            description: "起点断面高程Z1，单位：米（m）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "Z2",
            label: "终点高程",
            unit: "m",
            description: "终点断面高程Z2，单位：米（m）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "H1",
            label: "起点测压水头",
            unit: "m",
            description: "起点断面测压水头 P1/(ρk*g)，单位：米（m）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "H2",
            label: "终点测压水头",
            unit: "m",
            description: "终点断面测压水头 P2/(ρk*g)，单位：米（m）",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "i",
            label: "水力坡降",
            unit: "",
            description: "单位管长摩阻损失i，无量纲",
            default: None,
            optional: false,
        },
        ParamSpec {
            key: "L",
            label: "管道长度",
            unit: "m",
            description: "管道长度L，不能为负，单位：米（m）",
            default: None,
            optional: false,
        },
    ],
};

/// 全部公式分组，按界面展示顺序排列。
pub static GROUPS: [FormulaGroup; 3] = [
    FormulaGroup {
        name: "似均质流态",
        formulas: &[LIU_DEZHONG, WASP, FEI_XIANGJUN],
    },
    FormulaGroup {
        name: "非均质流态",
        formulas: &[KRONODZE_PRESSURE],
    },
    FormulaGroup {
        name: "辅助水力计算",
        formulas: &[FRICTION_LOSS, DENSITY_MIXING, DARCY_FRICTION, SLURRY_ACCEL_ENERGY],
    },
];

/// 按公式取描述。
pub fn find(id: FormulaId) -> &'static FormulaSpec {
    match id {
        FormulaId::LiuDezhong => &LIU_DEZHONG,
        FormulaId::Wasp => &WASP,
        FormulaId::FeiXiangjun => &FEI_XIANGJUN,
        FormulaId::KronodzePressure => &KRONODZE_PRESSURE,
        FormulaId::FrictionLoss => &FRICTION_LOSS,
        FormulaId::DensityMixing => &DENSITY_MIXING,
        FormulaId::DarcyFriction => &DARCY_FRICTION,
        FormulaId::SlurryAccelEnergy => &SLURRY_ACCEL_ENERGY,
    }
}

/// 遍历全部公式描述，按分组顺序。
pub fn all() -> impl Iterator<Item = &'static FormulaSpec> {
    GROUPS.iter().flat_map(|group| group.formulas.iter())
}
