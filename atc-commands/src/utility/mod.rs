pub mod embeds;
pub mod help;
pub mod metar;
pub mod usage;
