use super::heading;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineItem {
    pub id: &'static str,
    pub title: &'static str,
    pub date: &'static str,
    pub description: &'static str,
    pub image: Option<&'static str>,
}

pub const TIMELINE: [TimelineItem; 5] = [
    TimelineItem {
        id: "1",
        title: "The Beginning",
        date: "Spring 2020",
        description: "Every great friendship has a beginning, and ours started with laughter and shared dreams.",
        image: None,
    },
    TimelineItem {
        id: "2",
        title: "Adventures Begin",
        date: "Summer 2020",
        description: "Exploring new places, trying new things, and discovering how well we fit together.",
        image: None,
    },
    TimelineItem {
        id: "3",
        title: "Through Thick and Thin",
        date: "Fall 2020",
        description: "A season that showed our bond was stronger than anything life threw our way.",
        image: None,
    },
    TimelineItem {
        id: "4",
        title: "Growing Together",
        date: "Winter 2020",
        description: "Supporting each other's dreams, celebrating victories, and learning from every experience.",
        image: None,
    },
    TimelineItem {
        id: "5",
        title: "The Golden Era",
        date: "2021 - Present",
        description: "Inside jokes, spontaneous adventures, deep conversations, and a bond that keeps growing.",
        image: None,
    },
];

pub fn render() -> String {
    let mut out = heading(
        "Our Story",
        "A journey through the moments that shaped our friendship",
    );
    for item in TIMELINE.iter() {
        out.push_str(&format!("● {} ({})\n", item.title, item.date));
        out.push_str(&format!("  {}\n", item.description));
        if let Some(image) = item.image {
            out.push_str(&format!("  [image: {}]\n", image));
        }
        out.push('\n');
    }
    out
}
