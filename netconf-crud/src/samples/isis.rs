//! IS-IS neighbor report for instance DEFAULT.

use super::finish;
use crate::crud::CrudService;
use crate::error::Result;
use crate::model::clns_isis_oper::Isis;
use crate::report::process_isis;
use crate::session::Session;

/// Instance the report covers.
pub const INSTANCE_NAME: &str = "DEFAULT";

/// Key object selecting [`INSTANCE_NAME`].
pub fn isis_filter() -> Isis {
    Isis::with_instance(INSTANCE_NAME)
}

/// Read IS-IS state, format the neighbor report and close the session.
pub async fn read<S: Session>(mut session: S) -> Result<String> {
    let outcome = async {
        let isis = CrudService::new().read(&mut session, &isis_filter()).await?;
        process_isis(&isis)
    }
    .await;
    finish(session, outcome).await
}
