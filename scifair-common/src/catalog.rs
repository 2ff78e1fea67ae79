//! Canned guidance keyed by project category
//!
//! Project categories are free text written by the advisor ("Biology",
//! "Environmental Chemistry", ...). They are classified once into a closed
//! [`Category`] and every lookup is an exhaustive match, with `Unknown`
//! carrying the general-purpose content.

use serde::Serialize;

/// Category tags that have dedicated content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Chemistry,
    Biology,
    Physics,
    Unknown,
}

impl Category {
    /// Classify a free-text category (case-insensitive substring match)
    pub fn classify(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("chemistry") {
            Category::Chemistry
        } else if label.contains("biology") {
            Category::Biology
        } else if label.contains("physics") {
            Category::Physics
        } else {
            Category::Unknown
        }
    }

    pub fn safety_tips(self) -> &'static [&'static str] {
        match self {
            Category::Chemistry => &[
                "Always wear safety goggles",
                "Use gloves when handling chemicals",
                "Work in a well-ventilated area",
                "Ask an adult for supervision",
            ],
            Category::Biology => &[
                "Wash hands before and after",
                "Keep your workspace clean",
                "Use proper disposal methods",
                "Be gentle with living things",
            ],
            Category::Physics => &[
                "Protect your eyes during light experiments",
                "Be careful with moving parts",
                "Keep water away from electronics",
                "Use tools properly",
            ],
            Category::Unknown => &[
                "Always work with adult supervision",
                "Keep your workspace tidy",
                "Follow all safety instructions carefully",
                "Ask questions if you're unsure",
            ],
        }
    }

    pub fn fun_facts(self) -> &'static [&'static str] {
        match self {
            Category::Chemistry => &[
                "Did you know? Diamonds and pencil lead are made of the same element - Carbon!",
                "The only letter not in the periodic table is the letter 'J'!",
            ],
            Category::Biology => &[
                "Your body has enough DNA to stretch from the Earth to the Sun and back 600 times!",
                "A honeybee has to visit about 1,500 flowers to make one teaspoon of honey!",
            ],
            Category::Physics => &[
                "Lightning strikes the Earth about 100 times every second!",
                "Sound travels about 4.3 times faster in water than in air!",
            ],
            Category::Unknown => &[
                "Scientists estimate there are over 100 billion galaxies in the universe!",
                "The average human brain has about 100 billion neurons!",
            ],
        }
    }

    /// Extra tutorial step inserted before "Conduct Your Experiment"
    fn specialized_step(self) -> Option<TutorialStep> {
        match self {
            Category::Biology => Some(TutorialStep::new(
                "Observe Biological Changes",
                "Monitor living organisms or biological processes",
                &[
                    "Observe and document changes at regular intervals",
                    "Take careful measurements of growth or other biological processes",
                    "Note environmental conditions that might affect your specimens",
                    "Keep living specimens in appropriate conditions",
                    "Be patient - biological processes often take time",
                ],
            )),
            Category::Chemistry => Some(TutorialStep::new(
                "Perform Chemical Reactions",
                "Safely conduct chemical procedures",
                &[
                    "Double-check safety precautions before mixing any chemicals",
                    "Add chemicals in the correct order and amounts",
                    "Note color changes, temperature changes, or gas formation",
                    "Allow sufficient time for reactions to complete",
                    "Dispose of all chemicals properly according to safety guidelines",
                ],
            )),
            Category::Physics | Category::Unknown => None,
        }
    }
}

/// One expandable step of the project tutorial
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TutorialStep {
    pub title: String,
    pub description: String,
    pub details: Vec<String>,
}

impl TutorialStep {
    fn new(title: impl Into<String>, description: &str, details: &[&str]) -> Self {
        Self {
            title: title.into(),
            description: description.to_string(),
            details: details.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// One phase of the general "how a science project works" overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuidePhase {
    pub title: &'static str,
    pub summary: &'static str,
}

/// Step-by-step tutorial for a project with the given free-text category
pub fn tutorial(category_label: &str) -> Vec<TutorialStep> {
    let mut steps = vec![
        TutorialStep::new(
            "Set Up Your Workspace",
            "Prepare a clean area to work on your project",
            &[
                "Find a flat, stable surface with plenty of room to work",
                "Gather all your materials and tools in one place",
                "Put down protective covering if needed (newspaper, plastic sheet)",
                "Make sure you have good lighting",
                "Have a notebook ready to write down observations",
            ],
        ),
        TutorialStep::new(
            "Prepare Your Materials",
            "Get your materials ready for the experiment",
            &[
                "Carefully read through all instructions before starting",
                "Measure and prepare any substances you'll be using",
                "Label containers clearly if needed",
                "Put on any required safety equipment (gloves, goggles)",
                "Take 'before' photos if you want to document your process",
            ],
        ),
        TutorialStep::new(
            format!("Set Up Your {} Experiment", category_label),
            "Arrange your materials according to your plan",
            &[
                "Set up your experiment exactly as described in your plan",
                "Create your control group if applicable",
                "Make sure all variables except the one you're testing remain constant",
                "Double-check your setup against your hypothesis",
                "Take photos of your initial setup for documentation",
            ],
        ),
        TutorialStep::new(
            "Conduct Your Experiment",
            "Follow your procedure carefully",
            &[
                "Follow each step in your planned procedure",
                "Record observations as you go - what do you see happening?",
                "Take measurements at consistent intervals",
                "Note any unexpected results or surprises",
                "Repeat trials multiple times if possible for more reliable results",
            ],
        ),
        TutorialStep::new(
            "Record Your Data",
            "Document all your results",
            &[
                "Create tables for your numerical data",
                "Write detailed descriptions of what you observed",
                "Take 'after' photos to document results",
                "Be honest about all results, even if they weren't what you expected",
                "Look for patterns or trends in your data",
            ],
        ),
        TutorialStep::new(
            "Analyze Your Results",
            "Make sense of what happened",
            &[
                "Compare your results to your original hypothesis",
                "Calculate averages or other statistics if relevant",
                "Create graphs or charts to visualize your data",
                "Think about possible sources of error",
                "Draw conclusions based on your evidence",
            ],
        ),
        TutorialStep::new(
            "Present Your Findings",
            "Share what you learned",
            &[
                "Create a display board with clear sections",
                "Include your question, hypothesis, procedure, and results",
                "Add photos, graphs, and other visuals",
                "Prepare a short verbal explanation of your project",
                "Practice answering questions about your methods and conclusions",
            ],
        ),
    ];

    if let Some(step) = Category::classify(category_label).specialized_step() {
        steps.insert(3, step);
    }

    steps
}

/// Plan / Experiment / Learn overview shown above every project
pub fn project_guide() -> [GuidePhase; 3] {
    [
        GuidePhase {
            title: "Step 1: Plan",
            summary: "Review your hypothesis and gather the listed materials before you start.",
        },
        GuidePhase {
            title: "Step 2: Experiment",
            summary: "Follow your procedure, record lab notes and log every measurement.",
        },
        GuidePhase {
            title: "Step 3: Learn",
            summary: "Analyze your results, compare them with your hypothesis and present your findings.",
        },
    ]
}
