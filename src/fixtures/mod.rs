//! Generated test data for user scenarios.

use rand::Rng;
use rand::distr::Alphanumeric;

use crate::users::NewUser;

pub const STANDARD_USERNAME: &str = "Volodymyr_5000";
pub const EMAIL_DOMAIN: &str = "vova.test.ua";

const FIRST_NAMES: [&str; 8] = [
    "Olena", "Taras", "Iryna", "Bohdan", "Mariia", "Andrii", "Sofiia", "Dmytro",
];
const LAST_NAMES: [&str; 8] = [
    "Kovalenko", "Shevchenko", "Bondarenko", "Tkachenko", "Kravchenko", "Oliinyk", "Melnyk", "Boiko",
];

/// A random address at `domain`, shaped like `Olena.Melnyk_k3x9q@vova.test.ua`.
pub fn random_email(domain: &str) -> String {
    let mut rng = rand::rng();
    let first = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.random_range(0..LAST_NAMES.len())];
    let suffix: String = (&mut rng)
        .sample_iter(&Alphanumeric)
        .take(5)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("{first}.{last}_{suffix}@{domain}")
}

/// The standard user with a fresh e-mail, which doubles as the password.
pub fn standard_user() -> NewUser {
    let email = random_email(EMAIL_DOMAIN);
    NewUser {
        username: STANDARD_USERNAME.to_string(),
        password: email.clone(),
        email,
    }
}
