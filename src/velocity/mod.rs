//! 临界流速公式，管道输送矿浆不发生淤积的最低流速。

pub mod fei_xiangjun;
pub mod kronodze;
pub mod liu_dezhong;
pub mod wasp;
