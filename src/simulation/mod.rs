pub mod sample_portfolio;
