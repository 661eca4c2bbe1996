pub mod ecoflow;
