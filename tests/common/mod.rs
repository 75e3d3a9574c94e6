#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub fn control_dict(end_time: &str) -> String {
    format!(
        "FoamFile\n{{\n    version     2.0;\n    format      ascii;\n    class       dictionary;\n    object      controlDict;\n}}\n\napplication     simpleFoam;\nstartFrom       latestTime;\nstopAt          endTime;\nendTime         {end_time};\ndeltaT          1;\nwriteControl    timeStep;\n"
    )
}

/// Lay out `<root>/<name>/system/controlDict` plus iteration dirs and an
/// optional `log`. Returns the case directory.
pub fn write_case(
    root: &Path,
    name: &str,
    end_time: &str,
    iterations: &[u64],
    log: Option<&str>,
) -> PathBuf {
    let case_dir = root.join(name);
    fs::create_dir_all(case_dir.join("system")).unwrap();
    fs::create_dir_all(case_dir.join("constant")).unwrap();
    fs::write(case_dir.join("system/controlDict"), control_dict(end_time)).unwrap();
    for it in iterations {
        fs::create_dir_all(case_dir.join(it.to_string())).unwrap();
    }
    if let Some(log) = log {
        fs::write(case_dir.join("log"), log).unwrap();
    }
    case_dir
}

/// Seven cases, one or two per status.
pub fn reference_tree(root: &Path) {
    write_case(
        root,
        "12_Case_Type_Slab_NS_Height_30_Dist_20_dir_0_crashed",
        "3000",
        &[0, 100, 200],
        Some("Time = 200\n\njob aborted:\n[ranks] message\n[0] application aborted\n"),
    );
    write_case(
        root,
        "Case_17_m_crashed",
        "3000",
        &[0, 356],
        Some("Time = 356\nSIMPLE solution converged in 356 iterations\n\nFinalising parallel run\n"),
    );
    write_case(
        root,
        "Case_36_crashed",
        "3000",
        &[0, 50],
        Some("Time = 50\n---- error analysis -----\n[0] process exited without calling finalize\n"),
    );
    write_case(
        root,
        "6_Case_Type_Scatter_Height_20_Dist_20_dir_30_completed",
        "3000",
        &[0, 1000, 2000, 3000],
        Some("Time = 3000\nEnd\n\nFinalising parallel run\n"),
    );
    write_case(
        root,
        "6_Case_Type_Scatter_Height_20_Dist_20_dir_40_converged",
        "3000",
        &[0, 2345],
        Some("Time = 2345\n\nSIMPLE solution converged in 2345 iterations\n\nFinalising parallel run\n"),
    );
    write_case(
        root,
        "6_Case_Type_Scatter_Height_20_Dist_20_dir_40_inprogress",
        "3000",
        &[0, 600, 1200],
        None,
    );
    let not_started = write_case(
        root,
        "6_Case_Type_Scatter_Height_20_Dist_20_dir_40_notstarted",
        "3000",
        &[0],
        None,
    );

    // snappyHexMesh run of the not-started case; never a case of its own.
    let mesh = not_started.join("mesh");
    fs::create_dir_all(mesh.join("system")).unwrap();
    fs::write(mesh.join("system/controlDict"), control_dict("500")).unwrap();
}
