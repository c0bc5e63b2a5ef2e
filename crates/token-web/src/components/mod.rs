mod copy_link_icon;
mod external_link;

pub use copy_link_icon::CopyLinkIcon;
pub use external_link::{ExternalLink, ExternalLinkIcon};
