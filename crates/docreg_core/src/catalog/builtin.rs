//! Compiled-in baseline documents for the Northfield Solidarity docs hub.

use crate::model::document::{Category, Document};

struct StaticDocument {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    content: &'static str,
}

struct StaticCategory {
    name: &'static str,
    items: &'static [StaticDocument],
}

const CATALOG: &[StaticCategory] = &[
    StaticCategory {
        name: "Overview",
        items: &[
            StaticDocument {
                id: "overview-mission",
                title: "Mission & Structure",
                description: "How the holding company and its sub-brands fit together.",
                content: "# Mission & Structure\n\nNorthfield Solidarity is a holding company that \
                          owns and operates a family of member-aligned ventures.\n\n\
                          - **Holdings** own equity and set capital policy.\n\
                          - **Operating brands** run day-to-day services.\n\
                          - **Engines** are the shared internal platforms.\n",
            },
            StaticDocument {
                id: "overview-glossary",
                title: "Glossary",
                description: "Shared vocabulary used across internal documents.",
                content: "# Glossary\n\n**Engine**: a shared internal platform.\n\n\
                          **Steward**: the accountable owner of a document or engine.\n",
            },
        ],
    },
    StaticCategory {
        name: "Engines",
        items: &[
            StaticDocument {
                id: "engine-ledger",
                title: "Ledger Engine",
                description: "Double-entry books shared by every operating brand.",
                content: "# Ledger Engine\n\nThe ledger records every transfer as a balanced \
                          pair of entries. Brands post through the ledger, never around it.\n",
            },
            StaticDocument {
                id: "engine-event-bus",
                title: "Event Bus",
                description: "Publish/subscribe backbone for cross-brand events.",
                content: "# Event Bus\n\nEngines publish domain events to named topics. \
                          Consumers subscribe per topic and acknowledge each delivery.\n",
            },
            StaticDocument {
                id: "engine-marketplace",
                title: "Marketplace Engine",
                description: "Listings, carts and settlement for member commerce.",
                content: "# Marketplace Engine\n\nListings are published by brands, purchased \
                          through carts and settled on the ledger.\n",
            },
        ],
    },
    StaticCategory {
        name: "Governance",
        items: &[
            StaticDocument {
                id: "gov-charter",
                title: "Operating Charter",
                description: "Decision rights, voting and stewardship rules.",
                content: "# Operating Charter\n\n1. Members elect the board.\n\
                          2. The board appoints stewards.\n\
                          3. Stewards publish quarterly reports.\n",
            },
            StaticDocument {
                id: "gov-crowdfunding",
                title: "Community Crowdfunding",
                description: "How member pledges fund new ventures.",
                content: "# Community Crowdfunding\n\nCampaigns set a goal and a deadline. \
                          Pledges are captured only when the goal is met.\n",
            },
        ],
    },
    StaticCategory {
        name: "Operations",
        items: &[StaticDocument {
            id: "ops-onboarding",
            title: "Steward Onboarding",
            description: "First-week checklist for new stewards.",
            content: "# Steward Onboarding\n\n- Request docs editor access.\n\
                      - Read the operating charter.\n\
                      - Review the engines you own.\n",
        }],
    },
];

/// Materializes the compiled-in catalog.
pub(crate) fn categories() -> Vec<Category> {
    CATALOG
        .iter()
        .map(|category| {
            Category::new(
                category.name,
                category
                    .items
                    .iter()
                    .map(|document| {
                        Document::new(
                            document.id,
                            document.title,
                            document.content,
                            document.description,
                        )
                    })
                    .collect(),
            )
        })
        .collect()
}
