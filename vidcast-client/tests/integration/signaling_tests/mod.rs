mod test_offer_answer;
mod test_publish;
mod test_remove_track;
mod test_track_lifecycle;
