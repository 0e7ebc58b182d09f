use rand::{distributions::Alphanumeric, Rng};

const ID_LENGTH: usize = 16;

/// Random alphanumeric identifier for items added without one.
pub fn random_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LENGTH)
        .map(char::from)
        .collect()
}
