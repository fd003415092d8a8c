use super::time_ops::hhmm_to_seconds;
use super::{
    build_assignment_mappings, ArtifactPlan, CompileError, DataSourceHandles, ImportResolver,
    SumoConfig,
};
use crate::model::{SimulationBlock, SimulationModel};
use std::path::{Path, PathBuf};

/// the orchestrator of one compilation pass: resolves the model's imports,
/// then compiles each simulation block in declaration order into a fully
/// written artifact set under the export root.
///
/// compilation of a block is strictly sequential: time conversion, then
/// assignment validation, then directory recreation, then the exporter
/// chain, then the run-configuration descriptor. validation runs before the
/// output directory is touched, so a failing block leaves a previous good
/// run for the same config number intact.
pub struct SimulationCompiler {
    data_path: PathBuf,
    export_path: PathBuf,
    gui_settings_file: PathBuf,
}

impl SimulationCompiler {
    pub fn new<P: Into<PathBuf>>(
        data_path: P,
        export_path: P,
        gui_settings_file: P,
    ) -> SimulationCompiler {
        SimulationCompiler {
            data_path: data_path.into(),
            export_path: export_path.into(),
            gui_settings_file: gui_settings_file.into(),
        }
    }

    /// compiles every simulation block of the model. import resolution is
    /// shared across blocks, so a resolution failure aborts the whole run;
    /// a block failure aborts the run at that block.
    pub fn compile(&self, model: &SimulationModel) -> Result<(), CompileError> {
        let resolver = ImportResolver::new(&self.data_path);
        let mut handles = resolver.resolve(&model.imports)?;
        log::info!(
            "resolved {} imports; compiling {} simulation blocks",
            model.imports.len(),
            model.simulations.len()
        );
        for simulation in &model.simulations {
            self.compile_block(&mut handles, simulation)?;
        }
        Ok(())
    }

    pub fn compile_block(
        &self,
        handles: &mut DataSourceHandles,
        simulation: &SimulationBlock,
    ) -> Result<(), CompileError> {
        let config_num = simulation.config_num;
        let begin_seconds = hhmm_to_seconds(simulation.time_start)?;
        let end_seconds = hhmm_to_seconds(simulation.time_end)?;

        // validate assignments and required imports before any disk mutation
        let vehicles = handles
            .vehicles
            .as_deref()
            .ok_or(CompileError::MissingImport("vehicle"))?;
        let mappings = build_assignment_mappings(vehicles, &simulation.assignments)?;
        let network = handles
            .network
            .clone()
            .ok_or(CompileError::MissingImport("network"))?;
        if handles.feed.is_none() {
            return Err(CompileError::MissingImport("gtfs"));
        }
        if handles.demand.is_none() {
            return Err(CompileError::MissingImport("td"));
        }

        log::info!(
            "compiling Simulation_{config_num}: window [{begin_seconds}, {end_seconds}] seconds, {} assignments",
            simulation.assignments.len()
        );

        let plan = ArtifactPlan::new(&self.export_path, config_num, simulation.frequency);
        plan.prepare_directory()?;
        plan.write_edge_dump_descriptor()?;

        let feed = handles
            .feed
            .as_deref_mut()
            .ok_or(CompileError::MissingImport("gtfs"))?;
        feed.assign_vehicle(
            mappings.trip_to_vehicle.clone(),
            mappings.block_to_vehicle.clone(),
        );
        feed.export_route_file(
            begin_seconds,
            end_seconds,
            &simulation.schedule,
            &plan.raw_route_path(),
        )?;
        feed.export_busstop_file(&plan.stop_path(), &network)?;

        let vehicles = handles
            .vehicles
            .as_deref()
            .ok_or(CompileError::MissingImport("vehicle"))?;
        vehicles.export(&plan.vehicle_path())?;

        let demand = handles
            .demand
            .as_deref()
            .ok_or(CompileError::MissingImport("td"))?;
        demand.merge_route_file(
            &plan.raw_route_path(),
            &plan.vehicle_path(),
            &plan.stop_path(),
            &network,
            &plan.final_route_path(),
        )?;

        let mut additional_files = vec![plan.stop_file.clone(), plan.vehicle_file.clone()];
        if let Some(edge_dump_file) = &plan.edge_dump_file {
            additional_files.push(edge_dump_file.clone());
        }
        let config = SumoConfig {
            net_file: relative_to_run_directory(&network),
            route_files: vec![plan.final_route_file.clone()],
            additional_files,
            begin_seconds,
            end_seconds,
            netstate_dump: plan.dump_file.clone(),
            gui_settings_file: relative_to_run_directory(&self.gui_settings_file),
        };
        config.write(&plan.config_path())?;
        log::info!(
            "Simulation_{config_num} compiled: {}",
            plan.config_path().display()
        );
        Ok(())
    }
}

/// artifact files are referenced by bare name from the run directory; the
/// network and GUI settings live outside it, one level up from the export
/// root, so their paths are prefixed accordingly.
fn relative_to_run_directory(path: &Path) -> String {
    format!("../{}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{
        DataError, DemandProcessor, TransitFeed, VehicleCatalog,
    };
    use crate::model::VehicleAssignment;
    use std::collections::{HashMap, HashSet};
    use std::fs;
    use std::path::Path;

    struct FakeFeed {
        assigned_trips: HashMap<String, String>,
        assigned_blocks: HashMap<String, String>,
    }

    impl FakeFeed {
        fn new() -> FakeFeed {
            FakeFeed {
                assigned_trips: HashMap::new(),
                assigned_blocks: HashMap::new(),
            }
        }
    }

    impl TransitFeed for FakeFeed {
        fn assign_vehicle(
            &mut self,
            trip_map: HashMap<String, String>,
            block_map: HashMap<String, String>,
        ) {
            self.assigned_trips = trip_map;
            self.assigned_blocks = block_map;
        }
        fn export_route_file(
            &self,
            start_seconds: u32,
            end_seconds: u32,
            schedule: &str,
            path: &Path,
        ) -> Result<(), DataError> {
            fs::write(
                path,
                format!("<routes schedule=\"{schedule}\" begin=\"{start_seconds}\" end=\"{end_seconds}\"/>\n"),
            )
            .unwrap();
            Ok(())
        }
        fn export_busstop_file(&self, path: &Path, _network_path: &Path) -> Result<(), DataError> {
            fs::write(path, "<additional/>\n").unwrap();
            Ok(())
        }
    }

    struct FakeCatalog {
        ids: HashSet<String>,
    }

    impl VehicleCatalog for FakeCatalog {
        fn contains(&self, vehicle_id: &str) -> bool {
            self.ids.contains(vehicle_id)
        }
        fn export(&self, path: &Path) -> Result<(), DataError> {
            fs::write(path, "<additional/>\n").unwrap();
            Ok(())
        }
    }

    struct FakeDemand;

    impl DemandProcessor for FakeDemand {
        fn merge_route_file(
            &self,
            raw_route_path: &Path,
            _vehicle_path: &Path,
            _stop_path: &Path,
            _network_path: &Path,
            out_path: &Path,
        ) -> Result<(), DataError> {
            let raw = fs::read_to_string(raw_route_path).unwrap();
            fs::write(out_path, raw).unwrap();
            Ok(())
        }
    }

    fn handles(network: PathBuf, catalog_ids: &[&str]) -> DataSourceHandles {
        DataSourceHandles {
            feed: Some(Box::new(FakeFeed::new())),
            vehicles: Some(Box::new(FakeCatalog {
                ids: catalog_ids.iter().map(|s| s.to_string()).collect(),
            })),
            network: Some(network),
            demand: Some(Box::new(FakeDemand)),
        }
    }

    fn block(config_num: u32, frequency: Option<u32>) -> SimulationBlock {
        SimulationBlock {
            config_num,
            time_start: 600,
            time_end: 900,
            schedule: String::from("WEEKDAY"),
            assignments: vec![VehicleAssignment {
                vehicle_id: String::from("bus42"),
                trip_id: Some(String::from("T100")),
                block_id: None,
            }],
            frequency,
        }
    }

    fn compiler(dir: &Path) -> SimulationCompiler {
        SimulationCompiler::new(
            dir.join("data"),
            dir.join("export"),
            dir.join("data").join("gui.view.xml"),
        )
    }

    #[test]
    fn test_compile_block_produces_artifact_set() {
        let dir = tempfile::tempdir().unwrap();
        let network = dir.path().join("data").join("net.xml");
        let compiler = compiler(dir.path());
        let mut handles = handles(network, &["bus42"]);

        compiler.compile_block(&mut handles, &block(1, None)).unwrap();

        let run_dir = dir.path().join("export").join("Simulation_1");
        for file in [
            "Simulation_1_raw_routefile.xml",
            "Simulation_1_final_routefile.xml",
            "Simulation_1_stopfile.add.xml",
            "Simulation_1_vehicle.add.xml",
            "Simulation_1_config.sumocfg",
        ] {
            assert!(run_dir.join(file).is_file(), "missing {file}");
        }
        assert_eq!(fs::read_dir(&run_dir).unwrap().count(), 5);

        let config = fs::read_to_string(run_dir.join("Simulation_1_config.sumocfg")).unwrap();
        assert!(config.contains("<begin value=\"21600\"/>"));
        assert!(config.contains("<end value=\"32400\"/>"));
        assert!(config.contains(
            "<additional-files value=\"Simulation_1_stopfile.add.xml,Simulation_1_vehicle.add.xml\"/>"
        ));
        assert!(config.contains("<route-files value=\"Simulation_1_final_routefile.xml\"/>"));
    }

    #[test]
    fn test_compile_block_with_frequency_adds_edge_dump() {
        let dir = tempfile::tempdir().unwrap();
        let network = dir.path().join("data").join("net.xml");
        let compiler = compiler(dir.path());
        let mut handles = handles(network, &["bus42"]);

        compiler
            .compile_block(&mut handles, &block(2, Some(60)))
            .unwrap();

        let run_dir = dir.path().join("export").join("Simulation_2");
        assert!(run_dir.join("Simulation_2.edge.dump.add.xml").is_file());
        assert_eq!(fs::read_dir(&run_dir).unwrap().count(), 6);
        let config = fs::read_to_string(run_dir.join("Simulation_2_config.sumocfg")).unwrap();
        assert!(config.contains("Simulation_2.edge.dump.add.xml\"/>"));
    }

    #[test]
    fn test_unknown_vehicle_preserves_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let network = dir.path().join("data").join("net.xml");
        let compiler = compiler(dir.path());

        // a previous good run for the same config number
        let run_dir = dir.path().join("export").join("Simulation_1");
        fs::create_dir_all(&run_dir).unwrap();
        fs::write(run_dir.join("Simulation_1_config.sumocfg"), "previous").unwrap();

        let mut handles = handles(network, &["bus42"]);
        let mut bad_block = block(1, None);
        bad_block.assignments.push(VehicleAssignment {
            vehicle_id: String::from("ghost99"),
            trip_id: Some(String::from("T200")),
            block_id: None,
        });

        match compiler.compile_block(&mut handles, &bad_block) {
            Err(CompileError::UnknownVehicle(id)) => assert_eq!(id, "ghost99"),
            other => panic!("expected UnknownVehicle, got {other:?}"),
        }
        // validation failed before the directory reset
        let previous =
            fs::read_to_string(run_dir.join("Simulation_1_config.sumocfg")).unwrap();
        assert_eq!(previous, "previous");
    }

    #[test]
    fn test_invalid_time_encoding_fails_block() {
        let dir = tempfile::tempdir().unwrap();
        let network = dir.path().join("data").join("net.xml");
        let compiler = compiler(dir.path());
        let mut handles = handles(network, &["bus42"]);
        let mut bad_block = block(1, None);
        bad_block.time_end = 1671;

        let result = compiler.compile_block(&mut handles, &bad_block);
        assert!(matches!(result, Err(CompileError::InvalidTime(_))));
        assert!(!dir.path().join("export").join("Simulation_1").exists());
    }

    #[test]
    fn test_missing_import_fails_before_disk_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = compiler(dir.path());
        let mut handles = DataSourceHandles {
            demand: None,
            ..handles(dir.path().join("net.xml"), &["bus42"])
        };

        match compiler.compile_block(&mut handles, &block(4, None)) {
            Err(CompileError::MissingImport(kind)) => assert_eq!(kind, "td"),
            other => panic!("expected MissingImport, got {other:?}"),
        }
        assert!(!dir.path().join("export").join("Simulation_4").exists());
    }

    /// the full pipeline against real bindings: a miniature GTFS feed, a
    /// CSV vehicle catalog, a network file, and a background demand file.
    #[test]
    fn test_compile_model_end_to_end() {
        use crate::model::{ImportDeclaration, SimulationModel};

        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        let feed_dir = data.join("cartaFeed");
        fs::create_dir_all(&feed_dir).unwrap();

        fs::write(
            feed_dir.join("agency.txt"),
            "agency_id,agency_name,agency_url,agency_timezone\n\
             CARTA,Chattanooga Area RTA,https://www.gocarta.org,America/New_York\n",
        )
        .unwrap();
        fs::write(
            feed_dir.join("stops.txt"),
            "stop_id,stop_name,stop_lat,stop_lon\n\
             S1,Market Street,35.04,-85.31\n\
             S2,Depot,35.05,-85.30\n",
        )
        .unwrap();
        fs::write(
            feed_dir.join("routes.txt"),
            "route_id,agency_id,route_short_name,route_long_name,route_type\n\
             R1,CARTA,1,Downtown Loop,3\n",
        )
        .unwrap();
        fs::write(
            feed_dir.join("trips.txt"),
            "trip_id,route_id,service_id,block_id\n\
             T100,R1,WEEKDAY,B1\n\
             T900,R1,WEEKDAY,B1\n",
        )
        .unwrap();
        fs::write(
            feed_dir.join("stop_times.txt"),
            "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
             T100,06:00:40,06:01:00,S1,1\n\
             T100,06:10:00,06:10:20,S2,2\n\
             T900,23:00:00,23:00:00,S1,1\n\
             T900,23:10:00,23:10:00,S2,2\n",
        )
        .unwrap();
        fs::write(
            feed_dir.join("calendar.txt"),
            "service_id,monday,tuesday,wednesday,thursday,friday,saturday,sunday,start_date,end_date\n\
             WEEKDAY,1,1,1,1,1,0,0,20250101,20251231\n",
        )
        .unwrap();

        fs::write(
            data.join("fleetA.csv"),
            "id,vclass,length,accel,decel,max_speed,person_capacity\n\
             bus42,bus,12.0,1.2,4.0,20.0,55\n",
        )
        .unwrap();
        fs::write(data.join("Chattanooga_SUMO_Network.net.xml"), "<net/>\n").unwrap();
        fs::write(
            data.join("weekday_demand.rou.xml"),
            "<routes>\n\t<vehicle id=\"car_1\" depart=\"21700\">\n\t\t<route edges=\"e1 e2\"/>\n\t</vehicle>\n</routes>\n",
        )
        .unwrap();

        let model = SimulationModel {
            imports: vec![
                ImportDeclaration {
                    import_name: String::from("network.Chattanooga"),
                },
                ImportDeclaration {
                    import_name: String::from("vehicle.fleetA"),
                },
                ImportDeclaration {
                    import_name: String::from("gtfs.cartaFeed"),
                },
                ImportDeclaration {
                    import_name: String::from("td.weekday"),
                },
            ],
            simulations: vec![block(1, Some(30))],
        };

        let compiler = SimulationCompiler::new(
            data.clone(),
            dir.path().join("export"),
            data.join("gui.view.xml"),
        );
        compiler.compile(&model).unwrap();

        let run_dir = dir.path().join("export").join("Simulation_1");
        assert_eq!(fs::read_dir(&run_dir).unwrap().count(), 6);

        // the assigned trip runs under the catalog vehicle's identity; the
        // late-evening trip falls outside the window
        let raw = fs::read_to_string(run_dir.join("Simulation_1_raw_routefile.xml")).unwrap();
        assert!(raw.contains("<vehicle id=\"T100\" type=\"bus42\" depart=\"21660\">"));
        assert!(!raw.contains("T900"));

        let final_routes =
            fs::read_to_string(run_dir.join("Simulation_1_final_routefile.xml")).unwrap();
        let t100 = final_routes.find("id=\"T100\"").unwrap();
        let car_1 = final_routes.find("id=\"car_1\"").unwrap();
        assert!(t100 < car_1);

        let stops = fs::read_to_string(run_dir.join("Simulation_1_stopfile.add.xml")).unwrap();
        assert!(stops.contains("<busStop id=\"S1\" name=\"Market Street\""));

        let config = fs::read_to_string(run_dir.join("Simulation_1_config.sumocfg")).unwrap();
        assert!(config.contains("<begin value=\"21600\"/>"));
        assert!(config.contains("<end value=\"32400\"/>"));
        assert!(config.contains("Chattanooga_SUMO_Network.net.xml\"/>"));
        assert!(config.contains("Simulation_1.edge.dump.add.xml"));
    }

    #[test]
    fn test_recompile_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let network = dir.path().join("data").join("net.xml");
        let compiler = compiler(dir.path());
        let config_path = dir
            .path()
            .join("export")
            .join("Simulation_1")
            .join("Simulation_1_config.sumocfg");

        let mut handles = handles(network.clone(), &["bus42"]);
        compiler.compile_block(&mut handles, &block(1, None)).unwrap();
        let first = fs::read(&config_path).unwrap();

        compiler.compile_block(&mut handles, &block(1, None)).unwrap();
        let second = fs::read(&config_path).unwrap();
        assert_eq!(first, second);
    }
}
