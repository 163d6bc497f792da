//! Cosmetic titles unlocked by cumulative stars. They have no effect on play.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotivationalTag {
    pub id: &'static str,
    pub min_stars: u32,
    pub icon: &'static str,
    pub title: &'static str,
    pub message: &'static str,
}

/// Ordered by ascending `min_stars`.
pub const MOTIVATIONAL_TAGS: [MotivationalTag; 9] = [
    MotivationalTag {
        id: "newcomer",
        min_stars: 0,
        icon: "🌱",
        title: "Little Sprout",
        message: "You're just getting started! 🌱",
    },
    MotivationalTag {
        id: "explorer",
        min_stars: 3,
        icon: "🦇",
        title: "Cave Explorer",
        message: "You're exploring the cave! 🦇",
    },
    MotivationalTag {
        id: "learner",
        min_stars: 8,
        icon: "📚",
        title: "Pro Learner",
        message: "You're learning so fast! 📚",
    },
    MotivationalTag {
        id: "navigator",
        min_stars: 15,
        icon: "🗺️",
        title: "Grid Navigator",
        message: "You know your way around! 🗺️",
    },
    MotivationalTag {
        id: "star",
        min_stars: 25,
        icon: "⭐",
        title: "Star Collector",
        message: "Look at all your stars! ⭐",
    },
    MotivationalTag {
        id: "champ",
        min_stars: 35,
        icon: "🥇",
        title: "Coordinate Champ",
        message: "You're a true champion! 🥇",
    },
    MotivationalTag {
        id: "master",
        min_stars: 50,
        icon: "🏆",
        title: "Cave Master",
        message: "Master of the cave! 🏆",
    },
    MotivationalTag {
        id: "legend",
        min_stars: 75,
        icon: "👑",
        title: "Cave Legend",
        message: "A legendary explorer! 👑",
    },
    MotivationalTag {
        id: "mythical",
        min_stars: 100,
        icon: "🌟",
        title: "Mythical Explorer",
        message: "You're truly mythical! 🌟",
    },
];

/// Highest tier whose threshold has been reached.
pub fn current_tag(stars: u32) -> &'static MotivationalTag {
    MOTIVATIONAL_TAGS
        .iter()
        .rev()
        .find(|tag| stars >= tag.min_stars)
        .unwrap_or(&MOTIVATIONAL_TAGS[0])
}

/// Lowest tier still locked; `None` once every tier is unlocked.
pub fn next_tag(stars: u32) -> Option<&'static MotivationalTag> {
    MOTIVATIONAL_TAGS.iter().find(|tag| stars < tag.min_stars)
}

pub fn unlocked_tags(stars: u32) -> Vec<&'static MotivationalTag> {
    MOTIVATIONAL_TAGS
        .iter()
        .filter(|tag| stars >= tag.min_stars)
        .collect()
}

/// Stars still needed for the next tier, if any remains.
pub fn stars_to_next_tag(stars: u32) -> Option<u32> {
    next_tag(stars).map(|tag| tag.min_stars - stars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted() {
        assert!(MOTIVATIONAL_TAGS
            .windows(2)
            .all(|pair| pair[0].min_stars < pair[1].min_stars));
    }

    #[test]
    fn test_current_tag_is_largest_reached_threshold() {
        for stars in 0..=130 {
            let expected = MOTIVATIONAL_TAGS
                .iter()
                .filter(|tag| tag.min_stars <= stars)
                .max_by_key(|tag| tag.min_stars)
                .map(|tag| tag.id);
            assert_eq!(Some(current_tag(stars).id), expected, "stars = {}", stars);
        }
    }

    #[test]
    fn test_next_tag_is_smallest_locked_threshold() {
        for stars in 0..=130 {
            let expected = MOTIVATIONAL_TAGS
                .iter()
                .filter(|tag| tag.min_stars > stars)
                .min_by_key(|tag| tag.min_stars)
                .map(|tag| tag.id);
            assert_eq!(next_tag(stars).map(|tag| tag.id), expected, "stars = {}", stars);
        }
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(current_tag(2).id, "newcomer");
        assert_eq!(current_tag(3).id, "explorer");
        assert_eq!(current_tag(12).id, "learner");
        assert_eq!(next_tag(12).map(|t| t.id), Some("navigator"));
        assert_eq!(stars_to_next_tag(12), Some(3));
    }

    #[test]
    fn test_all_unlocked_is_terminal() {
        assert_eq!(current_tag(100).id, "mythical");
        assert!(next_tag(100).is_none());
        assert!(next_tag(5000).is_none());
        assert_eq!(stars_to_next_tag(100), None);
        assert_eq!(unlocked_tags(100).len(), MOTIVATIONAL_TAGS.len());
        assert_eq!(unlocked_tags(0).len(), 1);
    }
}
