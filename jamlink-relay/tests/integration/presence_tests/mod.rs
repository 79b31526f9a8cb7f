pub mod test_disconnect_announces_peer_left;
pub mod test_second_join_announces_both_ways;
