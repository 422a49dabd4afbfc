//! The split loop driving surfaces down to dice-able pieces.

pub use self::dice_test::{DiceTest, ExtentDiceTest};
pub use self::parameters::SplitParameters;
pub use self::split_pipeline::{SplitPipeline, SplitStats};

mod parameters;
mod split_pipeline;
