/// 浆体流动形态，按新算临界流速与锁定值之比分级。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowAnimation {
    /// 流速远低于临界值，严重淤积
    Settle30,
    /// 明显淤积
    Settle20,
    /// 轻微淤积，伴随流动
    Settle10Flow,
    /// 临界附近的平稳流动
    StillFlow,
    /// 中速流动
    MediumFlow,
    /// 高速流动
    FastFlow,
}

impl FlowAnimation {
    /// 按速度比分级。velocity_ratio 为新算 Vc 与锁定 Vc 之比。
    pub fn classify(velocity_ratio: f64) -> FlowAnimation {
        if velocity_ratio < 0.3 {
            FlowAnimation::Settle30
        } else if velocity_ratio < 0.6 {
            FlowAnimation::Settle20
        } else if velocity_ratio < 0.9 {
            FlowAnimation::Settle10Flow
        } else if velocity_ratio <= 1.1 {
            FlowAnimation::StillFlow
        } else if velocity_ratio <= 1.5 {
            FlowAnimation::MediumFlow
        } else {
            FlowAnimation::FastFlow
        }
    }

    /// 对外稳定标识。
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowAnimation::Settle30 => "settle-30",
            FlowAnimation::Settle20 => "settle-20",
            FlowAnimation::Settle10Flow => "settle-10-flow",
            FlowAnimation::StillFlow => "still-flow",
            FlowAnimation::MediumFlow => "medium-flow",
            FlowAnimation::FastFlow => "fast-flow",
        }
    }

    /// 界面描述。
    pub fn label(&self) -> &'static str {
        match self {
            FlowAnimation::Settle30 => "严重淤积，流速远低于临界值",
            FlowAnimation::Settle20 => "明显淤积，流速偏低",
            FlowAnimation::Settle10Flow => "轻微淤积，接近临界流速",
            FlowAnimation::StillFlow => "临界附近平稳流动",
            FlowAnimation::MediumFlow => "中速流动，高于临界值",
            FlowAnimation::FastFlow => "高速流动，远高于临界值",
        }
    }
}

/// 新算临界流速与锁定值对比，返回比值与对应流态。
pub fn compare_with_locked(new_vc: f64, locked_vc: f64) -> (f64, FlowAnimation) {
    let ratio = new_vc / locked_vc;
    (ratio, FlowAnimation::classify(ratio))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_covers_all_bands() {
        assert_eq!(FlowAnimation::classify(0.1), FlowAnimation::Settle30);
        assert_eq!(FlowAnimation::classify(0.45), FlowAnimation::Settle20);
        assert_eq!(FlowAnimation::classify(0.75), FlowAnimation::Settle10Flow);
        assert_eq!(FlowAnimation::classify(1.0), FlowAnimation::StillFlow);
        assert_eq!(FlowAnimation::classify(1.3), FlowAnimation::MediumFlow);
        assert_eq!(FlowAnimation::classify(2.0), FlowAnimation::FastFlow);
    }

    #[test]
    fn classify_boundary_values() {
        assert_eq!(FlowAnimation::classify(0.3), FlowAnimation::Settle20);
        assert_eq!(FlowAnimation::classify(0.6), FlowAnimation::Settle10Flow);
        assert_eq!(FlowAnimation::classify(0.9), FlowAnimation::StillFlow);
        assert_eq!(FlowAnimation::classify(1.1), FlowAnimation::StillFlow);
        assert_eq!(FlowAnimation::classify(1.5), FlowAnimation::MediumFlow);
        assert_eq!(FlowAnimation::classify(1.51), FlowAnimation::FastFlow);
    }

    #[test]
    fn compare_with_locked_divides_new_by_locked() {
        // 比值方向：新算值在分子，锁定值在分母
        let (ratio, state) = compare_with_locked(1.0, 4.0);
        assert_eq!(ratio, 0.25);
        assert_eq!(state, FlowAnimation::Settle30);

        let (ratio, state) = compare_with_locked(5.0, 4.0);
        assert_eq!(ratio, 1.25);
        assert_eq!(state, FlowAnimation::MediumFlow);
    }
}
