// crates/virtxml-rs/src/model/devices.rs

//! The device list and every device type it carries.
//!
//! Table order here is the wire order of `<devices>`: no matter which
//! fields a caller populates first, disks render before interfaces,
//! interfaces before serial ports, and so on.

use super::address::DeviceAddress;
use super::domain::Memory;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Devices {
    pub emulator: Option<String>,
    pub disks: Vec<Disk>,
    pub controllers: Vec<Controller>,
    pub filesystems: Vec<Filesystem>,
    pub interfaces: Vec<Interface>,
    pub serials: Vec<Serial>,
    pub consoles: Vec<Console>,
    pub inputs: Vec<Input>,
    pub graphics: Vec<Graphics>,
    pub videos: Vec<Video>,
    pub channels: Vec<Channel>,
    pub memballoon: Option<MemBalloon>,
    pub sounds: Vec<Sound>,
    pub rngs: Vec<Rng>,
    pub hostdevs: Vec<Hostdev>,
    pub memorydevs: Vec<Memorydev>,
}

table!(Devices {
    field!(ctext "emulator", Devices, opt_str emulator),
    field!(many "disk", Devices, disks: Disk),
    field!(many "controller", Devices, controllers: Controller),
    field!(many "filesystem", Devices, filesystems: Filesystem),
    field!(many "interface", Devices, interfaces: Interface),
    field!(many "serial", Devices, serials: Serial),
    field!(many "console", Devices, consoles: Console),
    field!(many "input", Devices, inputs: Input),
    field!(many "graphics", Devices, graphics: Graphics),
    field!(many "video", Devices, videos: Video),
    field!(many "channel", Devices, channels: Channel),
    field!(child "memballoon", Devices, memballoon: MemBalloon),
    field!(many "sound", Devices, sounds: Sound),
    field!(many "rng", Devices, rngs: Rng),
    field!(many "hostdev", Devices, hostdevs: Hostdev),
    field!(many "memory", Devices, memorydevs: Memorydev),
});

// --- Disks ---

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Disk {
    /// Source kind: `file`, `block`, `network`, `volume`.
    pub kind: String,
    pub device: Option<String>,
    pub driver: Option<DiskDriver>,
    pub auth: Option<DiskAuth>,
    pub source: Option<DiskSource>,
    pub target: Option<DiskTarget>,
    pub serial: Option<String>,
    pub wwn: Option<String>,
    pub boot: Option<DeviceBoot>,
    pub readonly: bool,
    pub shareable: bool,
    pub address: Option<DeviceAddress>,
}

table!(Disk {
    field!(attr "type", Disk, str kind),
    field!(attr "device", Disk, opt_str device),
    field!(child "driver", Disk, driver: DiskDriver),
    field!(child "auth", Disk, auth: DiskAuth),
    field!(child "source", Disk, source: DiskSource),
    field!(child "target", Disk, target: DiskTarget),
    field!(ctext "serial", Disk, opt_str serial),
    field!(ctext "wwn", Disk, opt_str wwn),
    field!(child "boot", Disk, boot: DeviceBoot),
    field!(flag "readonly", Disk, readonly),
    field!(flag "shareable", Disk, shareable),
    device_address!(Disk, address),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskDriver {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub cache: Option<String>,
    pub io: Option<String>,
    pub error_policy: Option<String>,
}

table!(DiskDriver {
    field!(attr "name", DiskDriver, opt_str name),
    field!(attr "type", DiskDriver, opt_str kind),
    field!(attr "cache", DiskDriver, opt_str cache),
    field!(attr "io", DiskDriver, opt_str io),
    field!(attr "error_policy", DiskDriver, opt_str error_policy),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskAuth {
    pub username: Option<String>,
    pub secret: Option<DiskSecret>,
}

table!(DiskAuth {
    field!(attr "username", DiskAuth, opt_str username),
    field!(child "secret", DiskAuth, secret: DiskSecret),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskSecret {
    pub kind: String,
    pub uuid: Option<String>,
}

table!(DiskSecret {
    field!(attr "type", DiskSecret, str kind),
    field!(attr "uuid", DiskSecret, opt_str uuid),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskSource {
    pub file: Option<String>,
    pub dev: Option<String>,
    pub protocol: Option<String>,
    pub name: Option<String>,
    pub pool: Option<String>,
    pub volume: Option<String>,
    pub hosts: Vec<DiskSourceHost>,
}

table!(DiskSource {
    field!(attr "file", DiskSource, opt_str file),
    field!(attr "dev", DiskSource, opt_str dev),
    field!(attr "protocol", DiskSource, opt_str protocol),
    field!(attr "name", DiskSource, opt_str name),
    field!(attr "pool", DiskSource, opt_str pool),
    field!(attr "volume", DiskSource, opt_str volume),
    field!(many "host", DiskSource, hosts: DiskSourceHost),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskSourceHost {
    pub transport: Option<String>,
    pub name: Option<String>,
    pub port: Option<String>,
    pub socket: Option<String>,
}

table!(DiskSourceHost {
    field!(attr "transport", DiskSourceHost, opt_str transport),
    field!(attr "name", DiskSourceHost, opt_str name),
    field!(attr "port", DiskSourceHost, opt_str port),
    field!(attr "socket", DiskSourceHost, opt_str socket),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskTarget {
    pub dev: Option<String>,
    pub bus: Option<String>,
}

table!(DiskTarget {
    field!(attr "dev", DiskTarget, opt_str dev),
    field!(attr "bus", DiskTarget, opt_str bus),
});

/// Per-device boot ordering, shared by disks and interfaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceBoot {
    pub order: u64,
}

table!(DeviceBoot {
    field!(attr "order", DeviceBoot, u64 order),
});

// --- Controllers ---

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Controller {
    pub kind: String,
    /// Absent index and index zero are different documents.
    pub index: Option<u64>,
    pub model: Option<String>,
    pub address: Option<DeviceAddress>,
}

table!(Controller {
    field!(attr "type", Controller, str kind),
    field!(attr "index", Controller, opt_u64 index),
    field!(attr "model", Controller, opt_str model),
    device_address!(Controller, address),
});

// --- Filesystems ---

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filesystem {
    pub kind: Option<String>,
    pub accessmode: Option<String>,
    pub driver: Option<FilesystemDriver>,
    pub source: Option<FilesystemSource>,
    pub target: Option<FilesystemTarget>,
    pub readonly: bool,
    pub address: Option<DeviceAddress>,
}

table!(Filesystem {
    field!(attr "type", Filesystem, opt_str kind),
    field!(attr "accessmode", Filesystem, opt_str accessmode),
    field!(child "driver", Filesystem, driver: FilesystemDriver),
    field!(child "source", Filesystem, source: FilesystemSource),
    field!(child "target", Filesystem, target: FilesystemTarget),
    field!(flag "readonly", Filesystem, readonly),
    device_address!(Filesystem, address),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilesystemDriver {
    pub kind: Option<String>,
    pub name: Option<String>,
    pub wrpolicy: Option<String>,
}

table!(FilesystemDriver {
    field!(attr "type", FilesystemDriver, opt_str kind),
    field!(attr "name", FilesystemDriver, opt_str name),
    field!(attr "wrpolicy", FilesystemDriver, opt_str wrpolicy),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilesystemSource {
    pub dir: Option<String>,
    pub file: Option<String>,
}

table!(FilesystemSource {
    field!(attr "dir", FilesystemSource, opt_str dir),
    field!(attr "file", FilesystemSource, opt_str file),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilesystemTarget {
    pub dir: Option<String>,
}

table!(FilesystemTarget {
    field!(attr "dir", FilesystemTarget, opt_str dir),
});

// --- Network interfaces ---

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interface {
    pub kind: String,
    pub mac: Option<Mac>,
    pub model: Option<InterfaceModel>,
    pub link: Option<Link>,
    pub boot: Option<DeviceBoot>,
    pub driver: Option<InterfaceDriver>,
    pub script: Option<Script>,
    pub source: Option<InterfaceSource>,
    pub target: Option<InterfaceTarget>,
    pub alias: Option<Alias>,
    pub virtualport: Option<Virtualport>,
    pub bandwidth: Option<Bandwidth>,
    pub address: Option<DeviceAddress>,
}

table!(Interface {
    field!(attr "type", Interface, str kind),
    field!(child "mac", Interface, mac: Mac),
    field!(child "model", Interface, model: InterfaceModel),
    field!(child "link", Interface, link: Link),
    field!(child "boot", Interface, boot: DeviceBoot),
    field!(child "driver", Interface, driver: InterfaceDriver),
    field!(child "script", Interface, script: Script),
    field!(child "source", Interface, source: InterfaceSource),
    field!(child "target", Interface, target: InterfaceTarget),
    field!(child "alias", Interface, alias: Alias),
    field!(child "virtualport", Interface, virtualport: Virtualport),
    field!(child "bandwidth", Interface, bandwidth: Bandwidth),
    device_address!(Interface, address),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mac {
    pub address: String,
}

table!(Mac {
    field!(attr "address", Mac, str address),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceModel {
    pub kind: String,
}

table!(InterfaceModel {
    field!(attr "type", InterfaceModel, str kind),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Link {
    pub state: Option<String>,
}

table!(Link {
    field!(attr "state", Link, opt_str state),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceDriver {
    pub name: Option<String>,
    pub queues: u64,
}

table!(InterfaceDriver {
    field!(attr "name", InterfaceDriver, opt_str name),
    field!(attr "queues", InterfaceDriver, omit0_u64 queues),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub path: Option<String>,
}

table!(Script {
    field!(attr "path", Script, opt_str path),
});

/// Where an interface connects. Which attributes apply depends on the
/// interface kind; RNG backends reuse the same shape for their sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceSource {
    pub bridge: Option<String>,
    pub network: Option<String>,
    pub kind: Option<String>,
    pub path: Option<String>,
    pub dev: Option<String>,
    pub address: Option<String>,
    pub port: u64,
    pub mode: Option<String>,
    pub service: Option<String>,
    pub host: Option<String>,
    pub local: Option<InterfaceSourceLocal>,
}

table!(InterfaceSource {
    field!(attr "bridge", InterfaceSource, opt_str bridge),
    field!(attr "network", InterfaceSource, opt_str network),
    field!(attr "type", InterfaceSource, opt_str kind),
    field!(attr "path", InterfaceSource, opt_str path),
    field!(attr "dev", InterfaceSource, opt_str dev),
    field!(attr "address", InterfaceSource, opt_str address),
    field!(attr "port", InterfaceSource, omit0_u64 port),
    field!(attr "mode", InterfaceSource, opt_str mode),
    field!(attr "service", InterfaceSource, opt_str service),
    field!(attr "host", InterfaceSource, opt_str host),
    field!(child "local", InterfaceSource, local: InterfaceSourceLocal),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceSourceLocal {
    pub address: Option<String>,
    pub port: u64,
}

table!(InterfaceSourceLocal {
    field!(attr "address", InterfaceSourceLocal, opt_str address),
    field!(attr "port", InterfaceSourceLocal, omit0_u64 port),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceTarget {
    pub dev: Option<String>,
}

table!(InterfaceTarget {
    field!(attr "dev", InterfaceTarget, opt_str dev),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alias {
    pub name: String,
}

table!(Alias {
    field!(attr "name", Alias, str name),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Virtualport {
    pub kind: Option<String>,
}

table!(Virtualport {
    field!(attr "type", Virtualport, opt_str kind),
});

/// QoS caps. An explicit zero is a real cap and renders as `average="0"`;
/// leaving the field unset omits the attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bandwidth {
    pub inbound: Option<BandwidthParams>,
    pub outbound: Option<BandwidthParams>,
}

table!(Bandwidth {
    field!(child "inbound", Bandwidth, inbound: BandwidthParams),
    field!(child "outbound", Bandwidth, outbound: BandwidthParams),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BandwidthParams {
    pub average: Option<i64>,
    pub burst: Option<i64>,
}

table!(BandwidthParams {
    field!(attr "average", BandwidthParams, opt_i64 average),
    field!(attr "burst", BandwidthParams, opt_i64 burst),
});

// --- Character devices ---

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Serial {
    pub kind: Option<String>,
    pub source: Option<ChardevSource>,
    pub target: Option<SerialTarget>,
}

table!(Serial {
    field!(attr "type", Serial, opt_str kind),
    field!(child "source", Serial, source: ChardevSource),
    field!(child "target", Serial, target: SerialTarget),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChardevSource {
    pub path: Option<String>,
    pub append: Option<String>,
}

table!(ChardevSource {
    field!(attr "path", ChardevSource, opt_str path),
    field!(attr "append", ChardevSource, opt_str append),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerialTarget {
    pub kind: Option<String>,
    pub port: Option<u64>,
}

table!(SerialTarget {
    field!(attr "type", SerialTarget, opt_str kind),
    field!(attr "port", SerialTarget, opt_u64 port),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Console {
    pub kind: Option<String>,
    pub target: Option<ConsoleTarget>,
}

table!(Console {
    field!(attr "type", Console, opt_str kind),
    field!(child "target", Console, target: ConsoleTarget),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleTarget {
    pub kind: Option<String>,
    pub port: Option<u64>,
}

table!(ConsoleTarget {
    field!(attr "type", ConsoleTarget, opt_str kind),
    field!(attr "port", ConsoleTarget, opt_u64 port),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Channel {
    pub kind: Option<String>,
    pub target: Option<ChannelTarget>,
}

table!(Channel {
    field!(attr "type", Channel, opt_str kind),
    field!(child "target", Channel, target: ChannelTarget),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelTarget {
    pub kind: Option<String>,
    pub name: Option<String>,
    pub state: Option<String>,
}

table!(ChannelTarget {
    field!(attr "type", ChannelTarget, opt_str kind),
    field!(attr "name", ChannelTarget, opt_str name),
    field!(attr "state", ChannelTarget, opt_str state),
});

// --- Input, graphics, video, sound ---

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Input {
    pub kind: String,
    pub bus: Option<String>,
    pub address: Option<DeviceAddress>,
}

table!(Input {
    field!(attr "type", Input, str kind),
    field!(attr "bus", Input, opt_str bus),
    device_address!(Input, address),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graphics {
    pub kind: String,
    /// `-1` requests auto-allocation.
    pub port: Option<i64>,
    pub autoport: Option<String>,
    pub listen: Option<String>,
}

table!(Graphics {
    field!(attr "type", Graphics, str kind),
    field!(attr "port", Graphics, opt_i64 port),
    field!(attr "autoport", Graphics, opt_str autoport),
    field!(attr "listen", Graphics, opt_str listen),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Video {
    pub model: VideoModel,
    pub address: Option<DeviceAddress>,
}

table!(Video {
    field!(child_req "model", Video, model: VideoModel),
    device_address!(Video, address),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoModel {
    pub kind: String,
    pub heads: u64,
    pub ram: u64,
    pub vram: u64,
    pub vgamem: u64,
}

table!(VideoModel {
    field!(attr "type", VideoModel, str kind),
    field!(attr "heads", VideoModel, omit0_u64 heads),
    field!(attr "ram", VideoModel, omit0_u64 ram),
    field!(attr "vram", VideoModel, omit0_u64 vram),
    field!(attr "vgamem", VideoModel, omit0_u64 vgamem),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sound {
    pub model: String,
    pub codec: Option<SoundCodec>,
    pub address: Option<DeviceAddress>,
}

table!(Sound {
    field!(attr "model", Sound, str model),
    field!(child "codec", Sound, codec: SoundCodec),
    device_address!(Sound, address),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoundCodec {
    pub kind: String,
}

table!(SoundCodec {
    field!(attr "type", SoundCodec, str kind),
});

// --- RNG, balloon, host devices, memory devices ---

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rng {
    pub model: String,
    pub rate: Option<RngRate>,
    pub backend: Option<RngBackend>,
}

table!(Rng {
    field!(attr "model", Rng, str model),
    field!(child "rate", Rng, rate: RngRate),
    field!(child "backend", Rng, backend: RngBackend),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RngRate {
    pub bytes: u64,
    pub period: u64,
}

table!(RngRate {
    field!(attr "bytes", RngRate, omit0_u64 bytes),
    field!(attr "period", RngRate, omit0_u64 period),
});

/// `<backend model="random">/dev/random</backend>` or
/// `<backend model="egd" type="udp">` with nested sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RngBackend {
    pub model: Option<String>,
    pub kind: Option<String>,
    pub device: Option<String>,
    pub sources: Vec<InterfaceSource>,
}

table!(RngBackend {
    field!(attr "model", RngBackend, opt_str model),
    field!(attr "type", RngBackend, opt_str kind),
    field!(text RngBackend, opt_str device),
    field!(many "source", RngBackend, sources: InterfaceSource),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemBalloon {
    pub model: String,
    pub address: Option<DeviceAddress>,
}

table!(MemBalloon {
    field!(attr "model", MemBalloon, str model),
    device_address!(MemBalloon, address),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hostdev {
    pub mode: Option<String>,
    pub kind: Option<String>,
    pub sgio: Option<String>,
    pub rawio: Option<String>,
    pub source: Option<HostdevSource>,
    pub address: Option<DeviceAddress>,
}

table!(Hostdev {
    field!(attr "mode", Hostdev, opt_str mode),
    field!(attr "type", Hostdev, opt_str kind),
    field!(attr "sgio", Hostdev, opt_str sgio),
    field!(attr "rawio", Hostdev, opt_str rawio),
    field!(child "source", Hostdev, source: HostdevSource),
    device_address!(Hostdev, address),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostdevSource {
    pub adapter: Option<HostdevAdapter>,
    pub address: Option<DeviceAddress>,
}

table!(HostdevSource {
    field!(child "adapter", HostdevSource, adapter: HostdevAdapter),
    device_address!(HostdevSource, address),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostdevAdapter {
    pub name: Option<String>,
}

table!(HostdevAdapter {
    field!(attr "name", HostdevAdapter, opt_str name),
});

/// A pluggable memory module; its root element is `<memory>`, like the
/// size element of the domain itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memorydev {
    pub model: String,
    pub access: Option<String>,
    pub target: Option<MemorydevTarget>,
    pub address: Option<DeviceAddress>,
}

table!(Memorydev {
    field!(attr "model", Memorydev, str model),
    field!(attr "access", Memorydev, opt_str access),
    field!(child "target", Memorydev, target: MemorydevTarget),
    device_address!(Memorydev, address),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorydevTarget {
    pub size: Option<Memory>,
    pub node: Option<u64>,
}

table!(MemorydevTarget {
    field!(child "size", MemorydevTarget, size: Memory),
    field!(ctext "node", MemorydevTarget, opt_u64 node),
});
