//! Free-text search applied ahead of the filter engine.
//!
//! Matching is a case-insensitive substring test on the raw query; only an
//! empty query keeps everything, so surrounding whitespace is significant.

use sprintdesk_model::{Issue, Project, User};

/// Something a list view can search by text.
pub trait Searchable {
    /// Haystacks the query is tested against; any hit keeps the item.
    fn haystacks(&self) -> Vec<String>;
}

impl Searchable for Issue {
    fn haystacks(&self) -> Vec<String> {
        let mut out = vec![self.title.clone()];
        if let Some(description) = &self.description {
            out.push(description.clone());
        }
        out.push(self.project.name.clone());
        out
    }
}

impl Searchable for User {
    fn haystacks(&self) -> Vec<String> {
        let mut out = vec![
            self.full_name(),
            self.username.clone(),
            self.email.clone(),
            self.role.as_str().to_string(),
        ];
        if let Some(title) = &self.title {
            out.push(title.clone());
        }
        out
    }
}

impl Searchable for Project {
    fn haystacks(&self) -> Vec<String> {
        let mut out = vec![self.name.clone()];
        if let Some(description) = &self.description {
            out.push(description.clone());
        }
        out
    }
}

pub fn matches_query<T: Searchable>(item: &T, query: &str) -> bool {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    item.haystacks()
        .iter()
        .any(|h| h.to_lowercase().contains(&needle))
}

pub fn search<T: Searchable + Clone>(items: &[T], query: &str) -> Vec<T> {
    if query.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| matches_query(*item, query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{issue, user};

    #[test]
    fn issue_search_covers_title_and_description() {
        let mut with_description = issue(1, "Open", "Low", None);
        with_description.description = Some("Crash on LOGIN page".to_string());
        let items = vec![with_description, issue(2, "Open", "Low", None)];

        assert_eq!(search(&items, "login").len(), 1);
        assert_eq!(search(&items, "issue 2")[0].id, 2);
    }

    #[test]
    fn issue_search_covers_project_name() {
        let mut other = issue(2, "Open", "Low", None);
        other.project.name = "Gemini".to_string();
        let items = vec![issue(1, "Open", "Low", None), other];

        let hits = search(&items, "apollo");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }

    #[test]
    fn user_search_covers_name_username_and_role() {
        let users = vec![user(1, "Admin", true), user(2, "Project Manager", true)];
        assert_eq!(search(&users, "first1 last1")[0].id, 1);
        assert_eq!(search(&users, "USER2")[0].id, 2);
        assert_eq!(search(&users, "manager")[0].id, 2);
    }

    #[test]
    fn user_search_covers_email_and_title() {
        let mut lead = user(1, "Contributor", true);
        lead.title = Some("Backend Lead".to_string());
        let users = vec![lead, user(2, "Contributor", true)];

        let by_email = search(&users, "user1@example.com");
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].id, 1);

        let by_title = search(&users, "backend");
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].id, 1);
    }

    #[test]
    fn empty_query_is_identity() {
        let users = vec![user(1, "Admin", true), user(2, "Contributor", true)];
        assert_eq!(search(&users, ""), users);
    }

    #[test]
    fn surrounding_whitespace_is_part_of_the_query() {
        let items = vec![issue(1, "Open", "Low", None)];
        assert!(search(&items, "issue 1 ").is_empty());
        assert!(search(&items, "   ").is_empty());
        assert_eq!(search(&items, "issue 1").len(), 1);
    }
}
