/// Names of the rows this service reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    GithubRepository,
    GithubToken,
}

impl SettingKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::GithubRepository => "githubRepository",
            SettingKey::GithubToken => "githubToken",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "githubRepository" => Some(SettingKey::GithubRepository),
            "githubToken" => Some(SettingKey::GithubToken),
            _ => None,
        }
    }
}

/// Snapshot of the stored settings, read fresh on every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub github_repository: Option<String>,
    pub github_token: Option<String>,
}

impl Settings {
    /// Build from raw `(key, value)` rows. Unknown keys are ignored.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (String, Option<String>)>,
    {
        rows.into_iter()
            .fold(Settings::default(), |mut settings, (key, value)| {
                match SettingKey::from_key(&key) {
                    Some(SettingKey::GithubRepository) => settings.github_repository = value,
                    Some(SettingKey::GithubToken) => settings.github_token = value,
                    None => {}
                }
                settings
            })
    }

    /// Repository and token, only when both are set and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let repository = self.github_repository.as_deref().filter(|s| !s.is_empty())?;
        let token = self.github_token.as_deref().filter(|s| !s.is_empty())?;
        Some((repository, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_fill_known_keys_only() {
        let settings = Settings::from_rows(vec![
            ("githubRepository".to_string(), Some("acme/site".to_string())),
            ("theme".to_string(), Some("dark".to_string())),
            ("githubToken".to_string(), Some("tok".to_string())),
        ]);
        assert_eq!(settings.credentials(), Some(("acme/site", "tok")));
    }

    #[test]
    fn empty_values_count_as_missing() {
        let settings = Settings {
            github_repository: Some("acme/site".into()),
            github_token: Some(String::new()),
        };
        assert_eq!(settings.credentials(), None);
        assert_eq!(Settings::default().credentials(), None);
    }

    #[test]
    fn keys_round_trip_through_their_column_names() {
        for key in [SettingKey::GithubRepository, SettingKey::GithubToken] {
            assert_eq!(SettingKey::from_key(key.as_str()), Some(key));
        }
    }
}
