//! Deterministic sample data for template previews.

use chrono::{DateTime, Duration, Utc};

use crate::post::Post;
use crate::recipient::Recipient;
use crate::registry::TemplateKind;
use crate::request::RenderRequest;

/// The recipient every preview is rendered for.
pub fn sample_recipient() -> Recipient {
    Recipient::new("preview@example.com", "John", "Doe").user_id(1)
}

/// Six sample posts, newest first, with publication dates counted back one
/// day at a time from `now`.
pub fn sample_posts_at(now: DateTime<Utc>) -> Vec<Post> {
    let entries: [(&str, &str, &str, &str); 6] = [
        (
            "Getting Started with Our Platform",
            "A comprehensive guide to help you make the most of all the features available to you as a member of our community.",
            "Tutorial",
            "Admin",
        ),
        (
            "Community Spotlight: Member Success Stories",
            "Read inspiring stories from members who have achieved their goals with the help of our community resources.",
            "Community",
            "Community Team",
        ),
        (
            "New Features Released This Month",
            "We've been busy building new tools and improvements based on your feedback. Here's everything that shipped.",
            "Updates",
            "Product Team",
        ),
        (
            "Tips and Tricks for Power Users",
            "Take your workflow to the next level with these lesser-known shortcuts and advanced techniques.",
            "Tips",
            "Support Team",
        ),
        (
            "Upcoming Events and Webinars",
            "Mark your calendar! We have exciting live sessions planned with industry experts and community leaders.",
            "Events",
            "Events Team",
        ),
        (
            "Best Practices for Engagement",
            "Learn how the most active members build meaningful connections and get the most value from the community.",
            "Guide",
            "Community Team",
        ),
    ];

    entries
        .iter()
        .enumerate()
        .map(|(index, (title, excerpt, category, author))| {
            let id = index as u64 + 1;
            Post::new(id, *title, format!("https://example.com/posts/{}", id))
                .excerpt(*excerpt)
                .featured_image(format!("https://picsum.photos/600/400?random={}", id))
                .author(*author)
                .published_at(now - Duration::days(index as i64))
                .category(*category)
        })
        .collect()
}

/// A complete render request for previewing one template variant, frozen at
/// `now` so repeated previews are identical.
pub fn sample_request_at(kind: TemplateKind, now: DateTime<Utc>) -> RenderRequest {
    RenderRequest::new(
        kind,
        sample_recipient(),
        "Your Weekly Newsletter - {{current_date}}",
        "https://example.com/unsubscribe?token=preview",
    )
    .preheader("Check out what's new this week, {{first_name}}!")
    .custom_content(
        "Hello {{first_name}}! We have some exciting updates to share with you this week. \
         Thank you for being part of our community!",
    )
    .posts(sample_posts_at(now))
    .preferences_url("https://example.com/preferences?token=preview")
    .website_url("https://example.com")
    .company_name("Example Community")
}

/// [`sample_request_at`] with the current wall-clock time.
pub fn sample_request(kind: TemplateKind) -> RenderRequest {
    sample_request_at(kind, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sample_request_is_valid_for_every_variant() {
        let now = Utc.with_ymd_and_hms(2025, 1, 5, 9, 0, 0).unwrap();
        for kind in TemplateKind::ALL {
            assert!(sample_request_at(kind, now).validate().is_ok());
        }
    }

    #[test]
    fn test_sample_posts_count_back_from_now() {
        let now = Utc.with_ymd_and_hms(2025, 1, 5, 9, 0, 0).unwrap();
        let posts = sample_posts_at(now);
        assert_eq!(posts.len(), 6);
        assert_eq!(posts[0].published_at, now);
        assert_eq!(posts[5].published_at, now - Duration::days(5));
    }
}
