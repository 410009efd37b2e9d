use crate::projects::{ProjectCard, SortOrder};

pub fn sort_projects(cards: &mut [ProjectCard], order: SortOrder) {
    match order {
        SortOrder::Name => cards.sort_by(|a, b| a.title.cmp(b.title)),
        SortOrder::Oldest => cards.sort_by(|a, b| a.date.cmp(&b.date)),
        SortOrder::Newest => cards.sort_by(|a, b| b.date.cmp(&a.date)),
    }
}

#[macro_export]
macro_rules! report {
    ($fallible:expr, $message:literal) => {
        match $fallible {
            Err(_) => {
                use log::error;
                error!($message)
            }
            _ => {}
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projects::catalog;

    fn titles(cards: &[ProjectCard]) -> Vec<&str> {
        cards.iter().map(|c| c.title).collect()
    }

    #[test]
    fn newest_puts_recent_work_first() {
        let mut cards = catalog();
        sort_projects(&mut cards, SortOrder::Newest);

        let sorted = titles(&cards);
        assert_eq!(sorted[0], "StudyShare Notes");
        assert_eq!(sorted[sorted.len() - 1], "Pixel Garden");
    }

    #[test]
    fn oldest_is_the_reverse_of_newest() {
        let mut newest = catalog();
        let mut oldest = catalog();
        sort_projects(&mut newest, SortOrder::Newest);
        sort_projects(&mut oldest, SortOrder::Oldest);

        let mut reversed = titles(&newest);
        reversed.reverse();
        assert_eq!(titles(&oldest), reversed);
    }

    #[test]
    fn name_sorts_lexicographically() {
        let mut cards = catalog();
        sort_projects(&mut cards, SortOrder::Name);

        let sorted = titles(&cards);
        let mut expected = sorted.clone();
        expected.sort();
        assert_eq!(sorted, expected);
    }
}
