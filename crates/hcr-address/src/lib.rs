pub mod candidate;
pub mod driver;
pub mod extract;
pub mod resolver;
pub mod session;
pub mod states;

pub use candidate::{AddressCandidate, AddressComponent, Place};
pub use driver::{run_session, AddressEvent, DriverConfig, GeocodeService};
pub use resolver::{clear_address_fields, resolve, resolve_from_free_text, resolve_from_structured};
pub use session::{GeocodeOutcome, GeocodeRequest, ResolutionSession, SessionPhase};
pub use states::{normalize_state, STATE_NAMES};
