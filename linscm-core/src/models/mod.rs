mod calc_stage;
mod render_mode;

pub use calc_stage::CalcStage;
pub use render_mode::RenderMode;
