pub mod analyze_food_image;
pub mod get_analysis;
pub mod get_analysis_history;
