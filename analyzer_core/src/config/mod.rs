pub mod analysis_config;
