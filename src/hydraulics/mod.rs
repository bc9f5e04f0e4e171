//! 辅助水力计算，配合临界流速公式完成管线设计校核。

pub mod darcy_friction;
pub mod density_mixing;
pub mod energy_check;
pub mod friction_loss;
