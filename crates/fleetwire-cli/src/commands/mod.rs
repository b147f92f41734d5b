pub mod groups;
pub mod lb;
pub mod tg;
