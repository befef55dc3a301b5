//! Reusable widgets: the address form, the filterable list, the list
//! cycler, and the tab-bar header.

pub mod address_form;
pub mod header;
pub mod item_list;
pub mod list_cycler;

pub use address_form::{AddressForm, FormEvent};
pub use header::Header;
pub use item_list::{FilterableList, FilterState, ListEntry, ListEvent};
pub use list_cycler::{EmptyCycler, ListCycler};
