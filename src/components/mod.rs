pub mod connection_status;
pub mod logo;
pub mod player_list;
pub mod prediction_card;
