// Narrative feedback attached to resume checks.
// Kept together so wording changes never touch scoring logic.

pub const MISSING_EMAIL: &str = "Missing email address";
pub const ADD_EMAIL: &str = "Add your email address for contact information";

pub const MISSING_PHONE: &str = "Missing phone number";
pub const ADD_PHONE: &str = "Add your phone number for contact information";

pub const HAS_LINKEDIN: &str = "Includes LinkedIn profile";
pub const ADD_LINKEDIN: &str = "Add your LinkedIn profile to enhance networking opportunities";

pub const HAS_EDUCATION: &str = "Education section is present";
pub const MISSING_EDUCATION: &str = "Missing or unclear education section";
pub const ADD_EDUCATION: &str = "Add a clear education section with degrees and institutions";

pub const HAS_EXPERIENCE: &str = "Work experience section is present";
pub const MISSING_EXPERIENCE: &str = "Missing or unclear work experience section";
pub const ADD_EXPERIENCE: &str =
    "Add detailed work experience with responsibilities and achievements";

pub const HAS_SKILLS: &str = "Skills section is present";
pub const MISSING_SKILLS: &str = "Missing or unclear skills section";
pub const ADD_SKILLS: &str =
    "Add a dedicated skills section highlighting your technical and soft skills";

pub const HAS_ACTION_VERBS: &str = "Good use of action verbs to describe achievements";
pub const FEW_ACTION_VERBS: &str = "Limited use of action verbs";
pub const ADD_ACTION_VERBS: &str = "Use more action verbs to describe your accomplishments";

pub const HAS_METRICS: &str = "Includes quantifiable achievements";
pub const MISSING_METRICS: &str = "Lacks quantifiable achievements";
pub const ADD_METRICS: &str = "Add metrics and numbers to demonstrate your impact";

pub const TOO_SHORT: &str = "Resume may be too short";
pub const EXPAND_RESUME: &str =
    "Expand your resume with more details about your experience and skills";
pub const TOO_LONG: &str = "Resume may be too long";
pub const CONDENSE_RESUME: &str =
    "Consider condensing your resume to focus on the most relevant information";
pub const GOOD_LENGTH: &str = "Resume length appears appropriate";

/// Appended to every result, in this order.
pub const GENERAL_SUGGESTIONS: &[&str] = &[
    "Tailor your resume for each job application to match the job description",
    "Use a clean, professional format with consistent styling",
];

pub const FALLBACK_STRENGTH: &str = "Resume provides basic information about your background";
