mod leaderboard_vm;
mod notice_vm;
mod phase_vm;
mod title_vm;

pub use leaderboard_vm::{
    EMPTY_LEADERBOARD, LeaderboardRowVm, LeaderboardVm, map_leaderboard, points_label,
};
pub use notice_vm::{NoticeVm, map_notices};
pub use phase_vm::{AnswerOptionVm, PhaseVm, progress_percent};
pub use title_vm::window_title;
