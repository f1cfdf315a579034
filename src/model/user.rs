use serde::{Deserialize, Serialize};

use super::input::{NewUser, UserPatch};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub nickname: String,
    pub school: String,
}

impl User {
    pub fn from_draft(id: String, draft: NewUser) -> Self {
        Self {
            id,
            name: draft.name,
            nickname: draft.nickname,
            school: draft.school,
        }
    }

    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(nickname) = patch.nickname {
            self.nickname = nickname;
        }
        if let Some(school) = patch.school {
            self.school = school;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User::from_draft(
            "user-1".to_string(),
            NewUser {
                name: "Kim".to_string(),
                nickname: "kimchi".to_string(),
                school: "SNU".to_string(),
            },
        )
    }

    #[test]
    fn test_apply_only_supplied_fields() {
        let mut user = sample();
        user.apply(UserPatch {
            name: Some("Lee".to_string()),
            ..Default::default()
        });
        assert_eq!(user.name, "Lee");
        assert_eq!(user.nickname, "kimchi");
        assert_eq!(user.school, "SNU");
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut user = sample();
        user.apply(UserPatch::default());
        assert_eq!(user, sample());
    }
}
