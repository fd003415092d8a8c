use super::CompileError;
use crate::data::{
    DemandProcessor, GtfsFeed, TransitFeed, TravelDemand, VehicleCatalog, VehicleTypeCatalog,
};
use crate::model::ImportDeclaration;
use std::path::{Path, PathBuf};

/// the bound data-source handles of one compilation pass. all slots are
/// optional at resolution time; the compiler fails with a `MissingImport`
/// when a simulation block needs a slot that was never bound.
#[derive(Default)]
pub struct DataSourceHandles {
    pub feed: Option<Box<dyn TransitFeed>>,
    pub vehicles: Option<Box<dyn VehicleCatalog>>,
    pub network: Option<PathBuf>,
    pub demand: Option<Box<dyn DemandProcessor>>,
}

/// resolves the model's import declarations against the data path. performs
/// no I/O writes; the only filesystem effect is reading the imported sources
/// and checking that the network file exists.
pub struct ImportResolver {
    data_path: PathBuf,
}

impl ImportResolver {
    pub fn new<P: Into<PathBuf>>(data_path: P) -> ImportResolver {
        ImportResolver {
            data_path: data_path.into(),
        }
    }

    /// binds each declaration to its slot by tag prefix. a duplicate import
    /// of a kind overwrites the earlier binding (declaration order wins).
    pub fn resolve(
        &self,
        imports: &[ImportDeclaration],
    ) -> Result<DataSourceHandles, CompileError> {
        let mut handles = DataSourceHandles::default();
        for declaration in imports {
            let tag = declaration.import_name.as_str();
            if let Some(feed_name) = tag.strip_prefix("gtfs.") {
                warn_on_overwrite("gtfs", handles.feed.is_some(), tag);
                handles.feed = Some(Box::new(GtfsFeed::open(&self.data_path, feed_name)?));
            } else if let Some(catalog_name) = tag.strip_prefix("vehicle.") {
                warn_on_overwrite("vehicle", handles.vehicles.is_some(), tag);
                let filepath = self.data_path.join(format!("{catalog_name}.csv"));
                handles.vehicles = Some(Box::new(VehicleTypeCatalog::from_csv(&filepath)?));
            } else if let Some(network_name) = tag.strip_prefix("network.") {
                warn_on_overwrite("network", handles.network.is_some(), tag);
                handles.network = Some(self.resolve_network(network_name)?);
            } else if let Some(demand_name) = tag.strip_prefix("td.") {
                warn_on_overwrite("td", handles.demand.is_some(), tag);
                handles.demand = Some(Box::new(TravelDemand::open(&self.data_path, demand_name)?));
            } else {
                return Err(CompileError::UnrecognizedImport(tag.to_string()));
            }
        }
        Ok(handles)
    }

    fn resolve_network(&self, network_name: &str) -> Result<PathBuf, CompileError> {
        let filepath = self
            .data_path
            .join(format!("{network_name}_SUMO_Network.net.xml"));
        if !filepath.exists() {
            return Err(CompileError::MissingNetworkFile(filepath));
        }
        Ok(filepath)
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }
}

fn warn_on_overwrite(kind: &str, already_bound: bool, tag: &str) {
    if already_bound {
        log::warn!("duplicate '{kind}.' import; '{tag}' overwrites the earlier binding");
    }
}
