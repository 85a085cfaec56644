//! Closed registry of content collections exposed through the admin gateway.
//!
//! Dispatch is a fixed enumeration, never reflection: an entity name outside
//! the eleven listed here resolves to nothing and the gateway answers 404.
//! Three entities are read-only through the admin surface (they are written
//! only by the public submission flows) and the publish/unpublish field
//! transitions are a hard-coded per-entity table.

use serde_json::{Value, json};

/// One of the eleven managed content collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Blogs,
    Resources,
    Careers,
    Events,
    Ads,
    Subscriptions,
    EventRegistrations,
    TeamMembers,
    Videos,
    GalleryItems,
    CareerApplications,
}

/// Every registered entity, in registration order.
pub const ALL_ENTITIES: [Entity; 11] = [
    Entity::Blogs,
    Entity::Resources,
    Entity::Careers,
    Entity::Events,
    Entity::Ads,
    Entity::Subscriptions,
    Entity::EventRegistrations,
    Entity::TeamMembers,
    Entity::Videos,
    Entity::GalleryItems,
    Entity::CareerApplications,
];

impl Entity {
    /// Resolves a public entity name. Unknown names are rejected, never
    /// defaulted.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "blogs" => Some(Self::Blogs),
            "resources" => Some(Self::Resources),
            "careers" => Some(Self::Careers),
            "events" => Some(Self::Events),
            "ads" => Some(Self::Ads),
            "subscriptions" => Some(Self::Subscriptions),
            "event-registrations" => Some(Self::EventRegistrations),
            "team-members" => Some(Self::TeamMembers),
            "videos" => Some(Self::Videos),
            "gallery-items" => Some(Self::GalleryItems),
            "career-applications" => Some(Self::CareerApplications),
            _ => None,
        }
    }

    /// Public name, which doubles as the store collection name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Blogs => "blogs",
            Self::Resources => "resources",
            Self::Careers => "careers",
            Self::Events => "events",
            Self::Ads => "ads",
            Self::Subscriptions => "subscriptions",
            Self::EventRegistrations => "event-registrations",
            Self::TeamMembers => "team-members",
            Self::Videos => "videos",
            Self::GalleryItems => "gallery-items",
            Self::CareerApplications => "career-applications",
        }
    }

    /// Entities written only by public submission flows; the admin gateway may
    /// list them but never mutate them.
    pub fn is_read_only(self) -> bool {
        matches!(
            self,
            Self::Subscriptions | Self::EventRegistrations | Self::CareerApplications
        )
    }

    /// The per-entity field transition applied by a bulk publish (`true`) or
    /// unpublish (`false`). `None` means the action is unsupported for this
    /// entity and must be rejected, not ignored.
    pub fn publish_patch(self, publish: bool) -> Option<Value> {
        match self {
            Self::Blogs => Some(json!({ "status": if publish { "published" } else { "draft" } })),
            Self::Resources => Some(json!({ "isPublished": publish })),
            Self::Careers => Some(json!({ "status": if publish { "open" } else { "closed" } })),
            Self::Events => {
                Some(json!({ "status": if publish { "scheduled" } else { "cancelled" } }))
            }
            Self::Ads | Self::TeamMembers | Self::Videos | Self::GalleryItems => {
                Some(json!({ "isActive": publish }))
            }
            Self::Subscriptions | Self::EventRegistrations | Self::CareerApplications => None,
        }
    }
}

/// Bulk operations accepted by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Delete,
    Publish,
    Unpublish,
}

impl BulkAction {
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "delete" => Some(Self::Delete),
            "publish" => Some(Self::Publish),
            "unpublish" => Some(Self::Unpublish),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_entity_is_rejected() {
        assert_eq!(Entity::parse("nonexistent-entity"), None);
        assert_eq!(Entity::parse("Blogs"), None);
        assert_eq!(Entity::parse(""), None);
    }

    #[test]
    fn parse_round_trips_every_name() {
        for entity in ALL_ENTITIES {
            assert_eq!(Entity::parse(entity.name()), Some(entity));
        }
    }

    #[test]
    fn exactly_three_entities_are_read_only() {
        let read_only: Vec<_> = ALL_ENTITIES
            .iter()
            .filter(|e| e.is_read_only())
            .map(|e| e.name())
            .collect();
        assert_eq!(
            read_only,
            vec!["subscriptions", "event-registrations", "career-applications"]
        );
    }

    #[test]
    fn publish_transitions_match_entity_fields() {
        assert_eq!(
            Entity::Blogs.publish_patch(true).unwrap(),
            serde_json::json!({"status": "published"})
        );
        assert_eq!(
            Entity::Blogs.publish_patch(false).unwrap(),
            serde_json::json!({"status": "draft"})
        );
        assert_eq!(
            Entity::Resources.publish_patch(true).unwrap(),
            serde_json::json!({"isPublished": true})
        );
        assert_eq!(
            Entity::Careers.publish_patch(false).unwrap(),
            serde_json::json!({"status": "closed"})
        );
        assert_eq!(
            Entity::Events.publish_patch(false).unwrap(),
            serde_json::json!({"status": "cancelled"})
        );
        assert_eq!(
            Entity::Videos.publish_patch(true).unwrap(),
            serde_json::json!({"isActive": true})
        );
    }

    #[test]
    fn read_only_entities_have_no_publish_transition() {
        assert!(Entity::Subscriptions.publish_patch(true).is_none());
        assert!(Entity::EventRegistrations.publish_patch(false).is_none());
        assert!(Entity::CareerApplications.publish_patch(true).is_none());
    }

    #[test]
    fn bulk_action_parse() {
        assert_eq!(BulkAction::parse("delete"), Some(BulkAction::Delete));
        assert_eq!(BulkAction::parse("publish"), Some(BulkAction::Publish));
        assert_eq!(BulkAction::parse("unpublish"), Some(BulkAction::Unpublish));
        assert_eq!(BulkAction::parse("archive"), None);
    }
}
