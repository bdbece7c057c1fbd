use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const SAMPLE_NBE: &str = "\
timestamps|||scan_start|Fri Oct  1 12:00:00 2010|
results|net1|10.0.0.5|80|12345|Security Hole|Buffer overflow. See CVE-2010-0425.
results|net1|10.0.0.5||portscan|Open port|
timestamps|||scan_end|Fri Oct  1 12:30:00 2010|
";

fn nbe2ivil(dir: &Path, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_nbe2ivil"));
    cmd.current_dir(dir);
    // Keep the user's real config file out of the picture.
    cmd.env("HOME", dir);
    cmd.env("XDG_CONFIG_HOME", dir.join("xdg-config"));
    cmd.args(args);
    cmd.output().expect("run nbe2ivil")
}

fn write_sample(dir: &Path) {
    fs::write(dir.join("scan.nbe"), SAMPLE_NBE).expect("write sample input");
}

#[test]
fn converts_nbe_to_ivil_with_default_outfile() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(dir.path());

    let out = nbe2ivil(
        dir.path(),
        &[
            "--scanner",
            "Nessus",
            "--scannerversion",
            "4.2",
            "--timestamp",
            "201010011200",
            "--infile",
            "scan.nbe",
        ],
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let xml = fs::read_to_string(dir.path().join("scan.ivil.xml")).expect("output file");

    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains(r#"scanner="Nessus""#));
    assert!(xml.contains(r#"version="4.2""#));
    assert!(xml.contains(r#"timestamp="201010011200""#));
    assert_eq!(xml.matches("<finding>").count(), 2);

    // First record: normalized port, mapped severity, extracted reference.
    assert!(xml.contains("<ip>10.0.0.5</ip>"));
    assert!(xml.contains("<port>80/tcp</port>"));
    assert!(xml.contains("<id>12345</id>"));
    assert!(xml.contains("<severity>1</severity>"));
    assert!(xml.contains("<cve>CVE-2010-0425</cve>"));

    // Second record: defaults for empty port and finding text.
    assert!(xml.contains("<id>portscan</id>"));
    assert!(xml.contains("<severity>4</severity>"));
    assert!(xml.contains("Port  is open"));
}

#[test]
fn addressee_block_requires_workspace_flag() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(dir.path());

    let out = nbe2ivil(
        dir.path(),
        &[
            "--scanner",
            "Nessus",
            "--timestamp",
            "201010011200",
            "--infile",
            "scan.nbe",
            "--workspace",
            "ws1",
            "--scan",
            "weekly",
        ],
    );
    assert!(out.status.success());

    let xml = fs::read_to_string(dir.path().join("scan.ivil.xml")).unwrap();
    assert!(xml.contains(r#"<addressee workspace="ws1" scan="weekly"/>"#));
}

#[test]
fn scan_name_defaults_to_workspace() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(dir.path());

    let out = nbe2ivil(
        dir.path(),
        &[
            "--scanner",
            "Nessus",
            "--timestamp",
            "201010011200",
            "--infile",
            "scan.nbe",
            "--workspace",
            "ws1",
        ],
    );
    assert!(out.status.success());

    let xml = fs::read_to_string(dir.path().join("scan.ivil.xml")).unwrap();
    assert!(xml.contains(r#"<addressee workspace="ws1" scan="ws1"/>"#));
}

#[test]
fn no_workspace_means_no_addressee() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(dir.path());

    let out = nbe2ivil(
        dir.path(),
        &[
            "--scanner",
            "Nessus",
            "--timestamp",
            "201010011200",
            "--infile",
            "scan.nbe",
        ],
    );
    assert!(out.status.success());

    let xml = fs::read_to_string(dir.path().join("scan.ivil.xml")).unwrap();
    assert!(!xml.contains("addressee"));
}

#[test]
fn explicit_outfile_is_respected() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(dir.path());

    let out = nbe2ivil(
        dir.path(),
        &[
            "--scanner",
            "Nessus",
            "--timestamp",
            "201010011200",
            "--infile",
            "scan.nbe",
            "--outfile",
            "custom.xml",
        ],
    );
    assert!(out.status.success());
    assert!(dir.path().join("custom.xml").exists());
    assert!(!dir.path().join("scan.ivil.xml").exists());
}

#[test]
fn missing_required_flags_print_usage_and_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(dir.path());

    for args in [
        vec!["--timestamp", "201010011200", "--infile", "scan.nbe"],
        vec!["--scanner", "Nessus", "--infile", "scan.nbe"],
        vec!["--scanner", "Nessus", "--timestamp", "201010011200"],
    ] {
        let out = nbe2ivil(dir.path(), &args);
        assert!(!out.status.success());

        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(stderr.contains("--"), "expected usage text, got: {stderr}");
        assert!(!dir.path().join("scan.ivil.xml").exists());
    }
}

#[test]
fn unreadable_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();

    let out = nbe2ivil(
        dir.path(),
        &[
            "--scanner",
            "Nessus",
            "--timestamp",
            "201010011200",
            "--infile",
            "missing.nbe",
        ],
    );

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("missing.nbe"));
    assert!(!dir.path().join("missing.ivil.xml").exists());
}

#[test]
fn nikto_plugin_ids_carry_the_path() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("nikto.nbe"),
        "results|net1|10.0.0.9|80|900045|Security Note|/cgi-bin/test-cgi: reveals environment\n",
    )
    .unwrap();

    let out = nbe2ivil(
        dir.path(),
        &[
            "--scanner",
            "Nikto",
            "--timestamp",
            "201010011200",
            "--infile",
            "nikto.nbe",
        ],
    );
    assert!(out.status.success());

    let xml = fs::read_to_string(dir.path().join("nikto.ivil.xml")).unwrap();
    assert!(xml.contains("<id>900045 /cgi-bin/test-cgi</id>"));
}

#[test]
fn empty_input_produces_empty_findings_block() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("empty.nbe"), "").unwrap();

    let out = nbe2ivil(
        dir.path(),
        &[
            "--scanner",
            "Nessus",
            "--timestamp",
            "201010011200",
            "--infile",
            "empty.nbe",
        ],
    );
    assert!(out.status.success());

    let xml = fs::read_to_string(dir.path().join("empty.ivil.xml")).unwrap();
    assert!(xml.contains("<findings>"));
    assert!(!xml.contains("<finding>"));
}
