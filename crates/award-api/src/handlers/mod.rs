pub mod delivery;
pub mod drafts;
pub mod health;
pub mod recommendations;
pub mod steps;
