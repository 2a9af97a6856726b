//! Name filtering over the fetched collection.
//!
//! Matching is a case-insensitive substring test on `User::name`. Results
//! keep collection order.

use crate::model::User;

/// Check if a user name matches the query.
/// The empty query matches everything.
pub fn matches(name: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    name.to_lowercase().contains(&query.to_lowercase())
}

/// Positions in `users` of every matching entry, in order
pub fn filter_indices(users: &[User], query: &str) -> Vec<usize> {
    users
        .iter()
        .enumerate()
        .filter(|(_, user)| matches(&user.name, query))
        .map(|(idx, _)| idx)
        .collect()
}

/// Matching users, in collection order
pub fn filter<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    filter_indices(users, query)
        .into_iter()
        .filter_map(|idx| users.get(idx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::user;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<User> {
        vec![
            user(1, "Leanne Graham"),
            user(2, "Ervin Howell"),
            user(3, "Clementine Bauch"),
            user(4, "Patricia Lebsack"),
            user(5, "Chelsey Dietrich"),
            user(6, "Mrs. Dennis Schulist"),
            user(7, "Kurtis Weissnat"),
            user(8, "Nicholas Runolfsdottir V"),
            user(9, "Glenna Reichert"),
            user(10, "Clementina DuBuque"),
        ]
    }

    fn ids(users: &[&User]) -> Vec<i64> {
        users.iter().map(|u| u.id).collect()
    }

    #[test]
    fn empty_query_returns_everything() {
        let users = sample();
        assert_eq!(filter(&users, "").len(), users.len());
        assert_eq!(filter_indices(&users, ""), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn exact_name_selects_single_user() {
        let users = vec![user(1, "User 1"), user(2, "User 2")];
        assert_eq!(ids(&filter(&users, "User 1")), vec![1]);
    }

    #[test]
    fn match_is_case_insensitive() {
        let users = sample();
        assert_eq!(ids(&filter(&users, "CLEMENT")), vec![3, 10]);
        assert_eq!(ids(&filter(&users, "graham")), vec![1]);
    }

    #[test]
    fn query_is_not_trimmed() {
        let users = sample();
        assert_eq!(ids(&filter(&users, " howell")), vec![2]);
        assert!(filter(&users, "howell ").is_empty());
    }

    #[test]
    fn no_match_and_empty_collection_both_yield_empty() {
        let users = sample();
        assert!(filter(&users, "zzz").is_empty());
        assert!(filter(&[], "anything").is_empty());
        assert!(filter(&[], "").is_empty());
    }

    #[test]
    fn results_are_an_ordered_subsequence() {
        let users = sample();
        for query in ["a", "e", "is", "Ch", "n", "r", " ", ".", "DuB"] {
            let result = filter_indices(&users, query);

            assert!(result.windows(2).all(|w| w[0] < w[1]), "order broken for {query:?}");
            for (idx, user) in users.iter().enumerate() {
                let expected = user.name.to_lowercase().contains(&query.to_lowercase());
                assert_eq!(result.contains(&idx), expected, "{query:?} vs {}", user.name);
            }
        }
    }

    #[test]
    fn non_ascii_names_fold_case() {
        let users = vec![user(1, "Élodie Durand"), user(2, "Øyvind Berg")];
        assert_eq!(ids(&filter(&users, "élo")), vec![1]);
        assert_eq!(ids(&filter(&users, "øy")), vec![2]);
        assert!(matches("ÉLODIE", "élodie"));
    }
}
