// crates/virtxml-rs/src/model/domain.rs

//! The domain document and its direct children.

use super::devices::Devices;

/// A complete virtual machine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Domain {
    /// Hypervisor driver, e.g. `kvm` or `qemu`.
    pub kind: Option<String>,
    pub name: Option<String>,
    pub uuid: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub memory: Option<Memory>,
    pub current_memory: Option<Memory>,
    pub max_memory: Option<MaxMemory>,
    pub vcpu: Option<Vcpu>,
    pub vcpus: Option<Vcpus>,
    pub cputune: Option<CpuTune>,
    pub os: Option<Os>,
    pub cpu: Option<Cpu>,
    pub on_poweroff: Option<String>,
    pub on_reboot: Option<String>,
    pub on_crash: Option<String>,
    pub devices: Option<Devices>,
    pub qemu_commandline: Option<QemuCommandline>,
}

table!(Domain {
    field!(attr "type", Domain, opt_str kind),
    field!(ctext "name", Domain, opt_str name),
    field!(ctext "uuid", Domain, opt_str uuid),
    field!(ctext "title", Domain, opt_str title),
    field!(ctext "description", Domain, opt_str description),
    field!(child "memory", Domain, memory: Memory),
    field!(child "currentMemory", Domain, current_memory: Memory),
    field!(child "maxMemory", Domain, max_memory: MaxMemory),
    field!(child "vcpu", Domain, vcpu: Vcpu),
    field!(child "vcpus", Domain, vcpus: Vcpus),
    field!(child "cputune", Domain, cputune: CpuTune),
    field!(child "os", Domain, os: Os),
    field!(child "cpu", Domain, cpu: Cpu),
    field!(ctext "on_poweroff", Domain, opt_str on_poweroff),
    field!(ctext "on_reboot", Domain, opt_str on_reboot),
    field!(ctext "on_crash", Domain, opt_str on_crash),
    field!(child "devices", Domain, devices: Devices),
    field!(child "commandline", Domain, qemu_commandline: QemuCommandline),
});

/// A memory amount with an optional unit, e.g. `<memory unit="KiB">8192</memory>`.
/// Also used for the size of a memory device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memory {
    pub unit: Option<String>,
    pub value: u64,
}

table!(Memory {
    field!(attr "unit", Memory, opt_str unit),
    field!(text Memory, u64 value),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaxMemory {
    pub unit: Option<String>,
    pub slots: u64,
    pub value: u64,
}

table!(MaxMemory {
    field!(attr "unit", MaxMemory, opt_str unit),
    field!(attr "slots", MaxMemory, omit0_u64 slots),
    field!(text MaxMemory, u64 value),
});

/// `<vcpu placement="static" cpuset="1-4,^3,6" current="1">2</vcpu>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vcpu {
    pub placement: Option<String>,
    pub cpuset: Option<String>,
    pub current: Option<String>,
    pub value: u64,
}

table!(Vcpu {
    field!(attr "placement", Vcpu, opt_str placement),
    field!(attr "cpuset", Vcpu, opt_str cpuset),
    field!(attr "current", Vcpu, opt_str current),
    field!(text Vcpu, u64 value),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vcpus {
    pub vcpus: Vec<VcpuEntry>,
}

table!(Vcpus {
    field!(many "vcpu", Vcpus, vcpus: VcpuEntry),
});

/// Per-vcpu state. `id` and `order` keep the absent/zero distinction: an
/// unordered vcpu omits `order` entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VcpuEntry {
    pub id: Option<u64>,
    pub enabled: Option<String>,
    pub hotpluggable: Option<String>,
    pub order: Option<u64>,
}

table!(VcpuEntry {
    field!(attr "id", VcpuEntry, opt_u64 id),
    field!(attr "enabled", VcpuEntry, opt_str enabled),
    field!(attr "hotpluggable", VcpuEntry, opt_str hotpluggable),
    field!(attr "order", VcpuEntry, opt_u64 order),
});

/// CFS tuning; quota may be negative (no limit).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuTune {
    pub shares: Option<u64>,
    pub period: Option<u64>,
    pub quota: Option<i64>,
}

table!(CpuTune {
    field!(ctext "shares", CpuTune, opt_u64 shares),
    field!(ctext "period", CpuTune, opt_u64 period),
    field!(ctext "quota", CpuTune, opt_i64 quota),
});

// --- Operating system / boot configuration ---

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Os {
    pub kind: Option<OsType>,
    pub loader: Option<Loader>,
    pub nvram: Option<NvRam>,
    pub kernel: Option<String>,
    pub initrd: Option<String>,
    pub cmdline: Option<String>,
    pub boot_devices: Vec<BootDevice>,
    pub bootmenu: Option<BootMenu>,
    pub smbios: Option<Smbios>,
    pub bios: Option<Bios>,
    pub init: Option<String>,
    pub init_args: Vec<String>,
}

table!(Os {
    field!(child "type", Os, kind: OsType),
    field!(child "loader", Os, loader: Loader),
    field!(child "nvram", Os, nvram: NvRam),
    field!(ctext "kernel", Os, opt_str kernel),
    field!(ctext "initrd", Os, opt_str initrd),
    field!(ctext "cmdline", Os, opt_str cmdline),
    field!(many "boot", Os, boot_devices: BootDevice),
    field!(child "bootmenu", Os, bootmenu: BootMenu),
    field!(child "smbios", Os, smbios: Smbios),
    field!(child "bios", Os, bios: Bios),
    field!(ctext "init", Os, opt_str init),
    field!(many_text "initarg", Os, init_args),
});

/// `<type arch="x86_64" machine="pc">hvm</type>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsType {
    pub arch: Option<String>,
    pub machine: Option<String>,
    pub kind: Option<String>,
}

table!(OsType {
    field!(attr "arch", OsType, opt_str arch),
    field!(attr "machine", OsType, opt_str machine),
    field!(text OsType, opt_str kind),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Loader {
    pub readonly: Option<String>,
    pub secure: Option<String>,
    pub kind: Option<String>,
    pub path: Option<String>,
}

table!(Loader {
    field!(attr "readonly", Loader, opt_str readonly),
    field!(attr "secure", Loader, opt_str secure),
    field!(attr "type", Loader, opt_str kind),
    field!(text Loader, opt_str path),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NvRam {
    pub template: Option<String>,
    pub path: Option<String>,
}

table!(NvRam {
    field!(attr "template", NvRam, opt_str template),
    field!(text NvRam, opt_str path),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootDevice {
    pub dev: String,
}

table!(BootDevice {
    field!(attr "dev", BootDevice, str dev),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootMenu {
    pub enabled: Option<String>,
    pub timeout: Option<String>,
}

table!(BootMenu {
    field!(attr "enabled", BootMenu, opt_str enabled),
    field!(attr "timeout", BootMenu, opt_str timeout),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Smbios {
    pub mode: Option<String>,
}

table!(Smbios {
    field!(attr "mode", Smbios, opt_str mode),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bios {
    pub useserial: Option<String>,
    pub reboot_timeout: Option<String>,
}

table!(Bios {
    field!(attr "useserial", Bios, opt_str useserial),
    field!(attr "rebootTimeout", Bios, opt_str reboot_timeout),
});

// --- Guest CPU definition ---

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cpu {
    pub match_mode: Option<String>,
    pub model: Option<CpuModel>,
    pub vendor: Option<String>,
    pub topology: Option<CpuTopology>,
    pub features: Vec<CpuFeature>,
    pub numa: Option<Numa>,
}

table!(Cpu {
    field!(attr "match", Cpu, opt_str match_mode),
    field!(child "model", Cpu, model: CpuModel),
    field!(ctext "vendor", Cpu, opt_str vendor),
    field!(child "topology", Cpu, topology: CpuTopology),
    field!(many "feature", Cpu, features: CpuFeature),
    field!(child "numa", Cpu, numa: Numa),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuModel {
    pub fallback: Option<String>,
    pub value: Option<String>,
}

table!(CpuModel {
    field!(attr "fallback", CpuModel, opt_str fallback),
    field!(text CpuModel, opt_str value),
});

/// Socket/core/thread counts are always written, zeros included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuTopology {
    pub sockets: u64,
    pub cores: u64,
    pub threads: u64,
}

table!(CpuTopology {
    field!(attr "sockets", CpuTopology, u64 sockets),
    field!(attr "cores", CpuTopology, u64 cores),
    field!(attr "threads", CpuTopology, u64 threads),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuFeature {
    pub policy: Option<String>,
    pub name: String,
}

table!(CpuFeature {
    field!(attr "policy", CpuFeature, opt_str policy),
    field!(attr "name", CpuFeature, str name),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Numa {
    pub cells: Vec<NumaCell>,
}

table!(Numa {
    field!(many "cell", Numa, cells: NumaCell),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumaCell {
    pub id: Option<String>,
    pub cpus: Option<String>,
    pub memory: Option<String>,
    pub unit: Option<String>,
}

table!(NumaCell {
    field!(attr "id", NumaCell, opt_str id),
    field!(attr "cpus", NumaCell, opt_str cpus),
    field!(attr "memory", NumaCell, opt_str memory),
    field!(attr "unit", NumaCell, opt_str unit),
});

// --- QEMU command-line passthrough ---

/// `<commandline xmlns="...">` with its arg/env children. The namespace
/// travels as an ordinary attribute so hand-built and decoded documents
/// render identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QemuCommandline {
    pub xmlns: Option<String>,
    pub args: Vec<QemuArg>,
    pub envs: Vec<QemuEnv>,
}

table!(QemuCommandline {
    field!(attr "xmlns", QemuCommandline, opt_str xmlns),
    field!(many "arg", QemuCommandline, args: QemuArg),
    field!(many "env", QemuCommandline, envs: QemuEnv),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QemuArg {
    pub value: String,
}

table!(QemuArg {
    field!(attr "value", QemuArg, str value),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QemuEnv {
    pub name: String,
    pub value: String,
}

table!(QemuEnv {
    field!(attr "name", QemuEnv, str name),
    field!(attr "value", QemuEnv, str value),
});
